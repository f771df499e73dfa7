//! dg-core: dashgate 공통 핵심 라이브러리
//!
//! 이 크레이트는 Gateway, Admin/Inventory 백엔드, CLI가 공유하는 인가 및
//! 라우팅 로직을 제공합니다. HTTP 프레임워크에 의존하지 않습니다.
//!
//! # 모듈 구조
//!
//! - `roles`: 애플리케이션별 role 열거형
//! - `policy`: operation별 허용 role 집합
//! - `auth`: principal, 토큰 추출, resolver 경계
//! - `gate`: 인가 게이트
//! - `routing`: prefix 기반 백엔드 라우팅
//! - `setting`: 환경변수 설정값 파싱
//! - `error`: 공통 에러 타입

pub mod auth;
pub mod error;
pub mod gate;
pub mod policy;
pub mod roles;
pub mod routing;
pub mod setting;

pub use error::{Error, Result};
pub use gate::{Decision, Gate};
pub use roles::{AdminRole, InventoryRole, Role};
