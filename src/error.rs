//! Error types for the Libris server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::response::ApiResponse;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("{0}")]
    Validation(String),

    #[error("User with id {0} not found")]
    UserNotFound(i32),

    #[error("Book with id {0} not found")]
    BookNotFound(i32),

    #[error("User already has a borrowed book")]
    AlreadyBorrowing,

    #[error("Book is out of stock")]
    OutOfStock,

    #[error("Invalid book returned")]
    BookMismatch,

    #[error("User has not borrowed a book")]
    NoActiveLoan,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error renders as
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UserNotFound(_) | AppError::BookNotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyBorrowing
            | AppError::OutOfStock
            | AppError::BookMismatch
            | AppError::NoActiveLoan => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage failures are retryable by the caller but their detail stays
        // in the logs, never in the response body.
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ApiResponse::<serde_json::Value>::error(status, message));

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
