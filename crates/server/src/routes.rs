pub mod auth;
pub mod users;

use axum::{
    http::{StatusCode, Uri},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;

use common::types::{ErrorBody, Health};

use crate::openapi::ApiDoc;
use crate::security;
use crate::state::ServerState;

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Only reached by authenticated requests; anonymous ones are stopped by the filter.
async fn not_found(uri: Uri) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new(format!("no route for {}", uri.path()), 404)))
}

/// Build the full application router: public auth routes, protected user
/// routes, the token filter, CORS and request tracing.
pub fn build_router(state: ServerState) -> Router {
    let public = Router::new()
        .route("/", get(health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/api-docs/openapi.json", get(openapi_json));

    let protected = Router::new()
        .route("/users/me", get(users::me))
        .route("/technologies", get(users::technologies));

    public
        .merge(protected)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), security::authenticate))
        .layer(security::cors_layer())
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
        .with_state(state)
}
