//! Application error type mapping to HTTP status codes and envelope format.

use axum::response::{IntoResponse, Response};

use chatlog_types::error::ChatError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Chat(ChatError),
    /// Malformed request body or form.
    Validation(String),
    PayloadTooLarge(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    fn code_and_message(&self) -> (&'static str, String) {
        match self {
            AppError::Chat(ChatError::Validation(msg)) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Chat(e @ ChatError::NotFound(_)) => ("NOT_FOUND", e.to_string()),
            AppError::Chat(e @ ChatError::CorruptData(_)) => ("CORRUPT_DATA", e.to_string()),
            AppError::Chat(e @ ChatError::Storage(_)) => ("STORAGE_ERROR", e.to_string()),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => ("PAYLOAD_TOO_LARGE", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = self.code_and_message();

        match code {
            "VALIDATION_ERROR" | "NOT_FOUND" | "PAYLOAD_TOO_LARGE" => {
                tracing::debug!(code, %message, "request rejected");
            }
            _ => tracing::error!(code, %message, "request failed"),
        }

        ApiResponse::error(code, &message, String::new(), 0).into_response()
    }
}
