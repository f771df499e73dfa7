//! dg-web: dashgate 서비스 공통 HTTP 계층
//!
//! axum 기반 서비스들이 공유하는 응답 타입과 미들웨어를 제공합니다.
//!
//! # 모듈 구조
//!
//! - `error`: API 에러와 `{ success: false, message }` 응답
//! - `response`: 성공 응답 envelope
//! - `middleware`: 요청 ID, principal 해석, 인가 게이트
//! - `telemetry`: tracing 초기화

pub mod error;
pub mod middleware;
pub mod response;
pub mod telemetry;

pub use error::{ApiError, Result};
pub use response::ApiResponse;
