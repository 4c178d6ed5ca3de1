// ============================
// crates/backend-lib/src/error.rs
// ============================
//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types covering every failure the API can surface
#[derive(Error, Debug)]
pub enum AppError {
    #[error("already exists: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("missing authorization token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("store error: {0}")]
    Store(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Unique-constraint violations surface as store errors,
            // matching the original API contract.
            AppError::Conflict(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidReference(_) | AppError::InvalidCredentials(_) => {
                StatusCode::BAD_REQUEST
            },
            AppError::MissingToken => StatusCode::FORBIDDEN,
            // Invalid or expired tokens return a server error rather than
            // 401, unlike the missing-token case. Existing clients depend
            // on the asymmetry.
            AppError::InvalidToken(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // No structured error codes; clients get status + message only
        let body = serde_json::json!({ "error": self.to_string() });

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Store(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Store(msg.to_string())
    }
}
