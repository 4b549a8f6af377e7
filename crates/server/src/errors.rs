use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::auth::AuthError;
use thiserror::Error;
use tracing::error;

/// Handler error; wraps the service error and picks the HTTP status.
#[derive(Debug)]
pub struct ApiError(pub AuthError);

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::Conflict => StatusCode::CONFLICT,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::Unauthorized | AuthError::TokenExpired | AuthError::TokenError(_) => StatusCode::UNAUTHORIZED,
            AuthError::HashError(_) | AuthError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status.is_server_error() {
            error!(error = %self.0, code = self.0.code(), "request failed");
            // internals stay in the log
            ErrorBody::new("internal server error", self.0.code())
        } else {
            ErrorBody::new(self.0.to_string(), self.0.code())
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("cannot bind listener: {0}")]
    Bind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError(AuthError::Validation("x".into())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError(AuthError::Conflict).status(), StatusCode::CONFLICT);
        assert_eq!(ApiError(AuthError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError(AuthError::TokenExpired).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError(AuthError::Repository("down".into())).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn server_errors_hide_details() {
        let resp = ApiError(AuthError::Repository("connection refused".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
