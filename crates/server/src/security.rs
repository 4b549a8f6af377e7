//! Stateless security filter chain.
//!
//! Every request passes [`authenticate`] before reaching a handler (the
//! fallback included). Public paths and CORS preflights go straight through;
//! anything else needs `Authorization: Bearer <jwt>`. The verified identity is
//! stored in the request extensions and read back with [`CurrentUser`].

use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use service::auth::{AuthError, Principal, UserDetails};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};

use crate::errors::ApiError;
use crate::state::ServerState;

/// Paths reachable without a token.
pub const PUBLIC_PATHS: &[&str] = &["/", "/register", "/login", "/api-docs/openapi.json"];

const BEARER: &str = "Bearer ";
const MISSING_CREDENTIALS: &str = "Full authentication is required to access this resource";

pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Body of every authentication failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct UnauthorizedBody {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

/// Authentication entry point: turns any failure into a 401.
#[derive(Debug)]
pub struct AuthRejection {
    path: String,
    message: String,
}

impl AuthRejection {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = UnauthorizedBody {
            status: StatusCode::UNAUTHORIZED.as_u16(),
            error: "Unauthorized".into(),
            message: self.message,
            path: self.path,
        };
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"))],
            Json(body),
        )
            .into_response()
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<String, &'static str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(MISSING_CREDENTIALS)?
        .to_str()
        .map_err(|_| "Authorization header is not valid ASCII")?;
    let token = value
        .strip_prefix(BEARER)
        .ok_or("Authorization header must use the Bearer scheme")?
        .trim();
    if token.is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    Ok(token.to_string())
}

/// Token filter, installed with `middleware::from_fn_with_state`.
pub async fn authenticate(State(state): State<ServerState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    if req.method() == Method::OPTIONS || is_public(&path) {
        return next.run(req).await;
    }

    let token = match bearer_token(req.headers()) {
        Ok(t) => t,
        Err(msg) => {
            debug!(%path, reason = msg, "rejecting unauthenticated request");
            return AuthRejection::new(path, msg).into_response();
        }
    };

    let details: UserDetails = match state.auth.authenticate(&token).await {
        Ok(d) => d,
        Err(e @ (AuthError::Repository(_) | AuthError::HashError(_))) => return ApiError(e).into_response(),
        Err(e) => {
            warn!(%path, error = %e, "token rejected");
            let msg = match e {
                AuthError::TokenExpired => "Token expired",
                AuthError::TokenError(_) => "Invalid token",
                _ => "Unknown principal",
            };
            return AuthRejection::new(path, msg).into_response();
        }
    };

    if !details.is_usable() {
        return AuthRejection::new(path, "Account is disabled").into_response();
    }

    req.extensions_mut().insert(details);
    next.run(req).await
}

/// The authenticated identity of the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserDetails);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserDetails>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AuthRejection::new(parts.uri.path(), MISSING_CREDENTIALS))
    }
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::PATCH])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::HeaderName::from_static("x-requested-with")])
        .max_age(Duration::from_secs(3600))
}
