//! API 에러 타입
//!
//! 모든 서비스의 실패 응답은 `{ "success": false, "message": ... }` 형태입니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 미인증 응답 메시지
pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";

/// API 에러
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("payload too large: {message}")]
    PayloadTooLarge { message: String },

    #[error("bad gateway: {message}")]
    BadGateway { message: String },

    #[error("core error: {0}")]
    Core(#[from] dg_core::Error),
}

/// 에러 응답 JSON
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            ApiError::PayloadTooLarge { message } => {
                (StatusCode::PAYLOAD_TOO_LARGE, message.clone())
            }
            ApiError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message.clone()),
            ApiError::Core(e) => {
                let status = StatusCode::from_u16(e.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let message = match e {
                    _ if status == StatusCode::UNAUTHORIZED => AUTHENTICATION_REQUIRED.to_string(),
                    dg_core::Error::Forbidden { message } => message.clone(),
                    _ if status.is_server_error() => {
                        tracing::error!(code = e.code(), "Core error: {}", e);
                        "Internal server error".to_string()
                    }
                    _ => e.to_string(),
                };
                (status, message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let body = ErrorResponse {
            success: false,
            message,
            request_id: crate::middleware::current_request_id(),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
