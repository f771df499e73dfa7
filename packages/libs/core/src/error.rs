//! 공통 에러 타입
//!
//! dashgate 전체에서 사용되는 에러 타입을 정의합니다.
//! 인가 실패(401/403)는 요청 단위로 응답이 되고, 설정 에러는 기동 단계에서
//! 프로세스를 중단시킵니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// dashgate 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Authorization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("authentication required")]
    Unauthenticated,

    #[error("forbidden: {message}")]
    Forbidden { message: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("operation '{operation}' has an empty allow-set")]
    EmptyAllowSet { operation: String },

    #[error("operation '{operation}' declared more than once")]
    DuplicateOperation { operation: String },

    #[error("operation '{operation}' is not declared in the policy")]
    UndeclaredOperation { operation: String },

    #[error("unknown {universe} role: '{role}'")]
    UnknownRole { universe: &'static str, role: String },

    #[error("invalid route prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    #[error("route prefixes overlap: '{first}' and '{second}'")]
    OverlappingPrefix { first: String, second: String },

    #[error("invalid base URL for {name} '{url}': {reason}")]
    InvalidBaseUrl {
        name: String,
        url: String,
        reason: String,
    },

    #[error("invalid setting {name}='{value}': {reason}")]
    InvalidSetting {
        name: String,
        value: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────────────────────
    // Token Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("invalid request path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // IO/Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            Error::Unauthenticated | Error::TokenExpired | Error::InvalidToken { .. } => 401,

            // 403 Forbidden
            Error::Forbidden { .. } => 403,

            // 400 Bad Request
            Error::InvalidPath { .. } => 400,

            // 설정 에러는 요청 단계까지 오지 않아야 함
            _ => 500,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::Unauthenticated => "UNAUTHENTICATED",
            Error::Forbidden { .. } => "FORBIDDEN",
            Error::EmptyAllowSet { .. } => "EMPTY_ALLOW_SET",
            Error::DuplicateOperation { .. } => "DUPLICATE_OPERATION",
            Error::UndeclaredOperation { .. } => "UNDECLARED_OPERATION",
            Error::UnknownRole { .. } => "UNKNOWN_ROLE",
            Error::InvalidPrefix { .. } => "INVALID_PREFIX",
            Error::OverlappingPrefix { .. } => "OVERLAPPING_PREFIX",
            Error::InvalidBaseUrl { .. } => "INVALID_BASE_URL",
            Error::InvalidSetting { .. } => "INVALID_SETTING",
            Error::TokenExpired => "TOKEN_EXPIRED",
            Error::InvalidToken { .. } => "INVALID_TOKEN",
            Error::InvalidPath { .. } => "INVALID_PATH",
            Error::Yaml(_) => "YAML_ERROR",
            Error::Json(_) => "JSON_ERROR",
            Error::Io(_) => "IO_ERROR",
        }
    }

    /// 기동 단계에서 발생해야 하는 설정 에러인지 확인
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::EmptyAllowSet { .. }
                | Error::DuplicateOperation { .. }
                | Error::UndeclaredOperation { .. }
                | Error::UnknownRole { .. }
                | Error::InvalidPrefix { .. }
                | Error::OverlappingPrefix { .. }
                | Error::InvalidBaseUrl { .. }
                | Error::InvalidSetting { .. }
                | Error::Yaml(_)
                | Error::Io(_)
        )
    }
}
