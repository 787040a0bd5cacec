//! Response envelope shared by every endpoint

use axum::http::StatusCode;
use serde::Serialize;

/// Uniform JSON envelope: `{status, code, message, data, count?}`.
/// `code` mirrors the HTTP status so clients can ignore transport details.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(code: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: "success",
            code: code.as_u16(),
            message: message.into(),
            data,
            count: None,
        }
    }

    pub fn success_with_count(
        code: StatusCode,
        message: impl Into<String>,
        data: T,
        count: usize,
    ) -> Self {
        Self {
            status: "success",
            code: code.as_u16(),
            message: message.into(),
            data: Some(data),
            count: Some(count),
        }
    }

    pub fn error(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: "error",
            code: code.as_u16(),
            message: message.into(),
            data: None,
            count: None,
        }
    }
}
