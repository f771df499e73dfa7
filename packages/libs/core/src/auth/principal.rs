//! 요청 주체 (Principal)

use std::fmt;

use serde::{Deserialize, Serialize};

use super::claims::PrincipalClaims;
use super::token::TokenKind;
use crate::error::Result;
use crate::roles::Role;

/// 불투명한 사용자 식별자
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(pub String);

impl From<&str> for PrincipalId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PrincipalId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 요청 하나 동안만 존재하는 인증 주체
///
/// `role`이 `None`이면 role claim이 없거나, 비어 있거나, 이 애플리케이션의
/// role로 해석되지 않는 경우입니다. 게이트는 이를 항상 거부합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal<R: Role> {
    Authenticated { id: PrincipalId, role: Option<R> },
    Unauthenticated,
}

impl<R: Role> Principal<R> {
    pub fn authenticated(id: PrincipalId, role: Option<R>) -> Self {
        Principal::Authenticated { id, role }
    }

    /// Claims에서 생성. role claim은 `R`로 파싱되며 실패하면 `None`.
    pub fn from_claims(claims: &PrincipalClaims) -> Self {
        let role = claims.role_claim().and_then(|raw| {
            let parsed = R::parse(raw);
            if parsed.is_none() {
                tracing::debug!(
                    universe = R::UNIVERSE,
                    role = raw,
                    sub = %claims.sub,
                    "role claim not recognized"
                );
            }
            parsed
        });

        Principal::Authenticated {
            id: PrincipalId(claims.sub.clone()),
            role,
        }
    }

    pub fn id(&self) -> Option<&PrincipalId> {
        match self {
            Principal::Authenticated { id, .. } => Some(id),
            Principal::Unauthenticated => None,
        }
    }

    pub fn role(&self) -> Option<R> {
        match self {
            Principal::Authenticated { role, .. } => *role,
            Principal::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Principal::Authenticated { .. })
    }
}

/// 토큰 → Principal 변환기
///
/// 토큰 검증(서명 등)은 구현체의 책임입니다. 토큰이 없으면
/// `Principal::Unauthenticated`를, 토큰이 유효하지 않으면 에러를 돌려줍니다.
pub trait PrincipalResolver<R: Role>: Send + Sync {
    fn resolve(&self, token: Option<&TokenKind>) -> Result<Principal<R>>;
}
