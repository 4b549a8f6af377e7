use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use models::UserRole;
use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::AuthError;

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterOutput {
    pub uid: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginOutput {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub uid: i32,
    pub email: String,
    pub role: UserRole,
}

/// Body that cannot be decoded is a validation failure, not a 422.
fn malformed(rejection: JsonRejection) -> ApiError {
    ApiError(AuthError::Validation(rejection.body_text()))
}

#[utoipa::path(post, path = "/register", tag = "auth", request_body = crate::openapi::RegisterRequest,
    responses((status = 200, description = "Registered", body = crate::openapi::RegisterResponse), (status = 400, description = "Invalid input"), (status = 409, description = "Email already registered")))]
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<Json<RegisterOutput>, ApiError> {
    let Json(input) = payload.map_err(malformed)?;
    let user = state.auth.register(input).await?;
    Ok(Json(RegisterOutput { uid: user.id }))
}

#[utoipa::path(post, path = "/login", tag = "auth", request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Logged in", body = crate::openapi::LoginResponse), (status = 401, description = "Bad credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<LoginOutput>, ApiError> {
    let Json(input) = payload.map_err(malformed)?;
    let session = state.auth.login(input).await?;
    debug!(uid = session.user.id, "token issued");
    Ok(Json(LoginOutput {
        token: session.token,
        token_type: "Bearer".into(),
        expires_in: session.expires_in,
        uid: session.user.id,
        email: session.user.email,
        role: session.user.role,
    }))
}
