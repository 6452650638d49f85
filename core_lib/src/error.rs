//! Application error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal server error")]
    InternalServerError,

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InternalServerError
            | AppError::Config(_)
            | AppError::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match self {
            AppError::BadRequest(msg) => msg,
            AppError::NotFound(msg) => msg,
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::MethodNotAllowed => "Method not allowed".to_string(),
            AppError::InternalServerError => "Internal server error".to_string(),
            AppError::Config(err) => {
                tracing::error!("Configuration error: {}", err);
                "Internal server error".to_string()
            }
            AppError::IoError(err) => {
                tracing::error!("IO error: {:?}", err);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::MethodNotAllowed.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            AppError::from(::config::ConfigError::Message("bad".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_status() {
        let response = AppError::NotFound("User jack not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::InternalServerError.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
