//! 인증 주체 관련 타입
//!
//! # 개요
//!
//! 토큰 발급과 서명 검증은 외부 인증 계층의 책임입니다. 이 모듈은 그
//! 결과물인 principal(`{id, role}` 또는 미인증)을 표현하고, 헤더에서 토큰을
//! 꺼내 principal로 바꾸는 경계(`PrincipalResolver`)를 정의합니다.

mod claims;
mod principal;
mod token;

pub use claims::{PrincipalClaims, SESSION_COOKIE};
pub use principal::{Principal, PrincipalId, PrincipalResolver};
pub use token::{encode_dev_token, DevTokenResolver, TokenKind};
