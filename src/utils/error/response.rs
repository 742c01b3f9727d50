//! HTTP response handling for errors

use super::types::CheckerError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for CheckerError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();

        // Internal details stay in the logs
        let message = if status_code.is_server_error() {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                request_id: None,
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

impl CheckerError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            CheckerError::Busy => (StatusCode::CONFLICT, "BATCH_BUSY"),
            CheckerError::Parse(_) => (StatusCode::BAD_REQUEST, "PARSE_ERROR"),
            CheckerError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            CheckerError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            CheckerError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            CheckerError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            CheckerError::FileStorage(_) | CheckerError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}
