//! 토큰 추출 및 개발용 디코딩
//!
//! 서명 검증은 다루지 않습니다. `DevTokenResolver`는 로컬/테스트 환경에서
//! 서명 없는 claims를 그대로 읽습니다.

use base64::{engine::general_purpose, Engine as _};

use super::claims::{PrincipalClaims, SESSION_COOKIE};
use super::principal::{Principal, PrincipalResolver};
use crate::error::{Error, Result};
use crate::roles::Role;

/// 토큰 종류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `Authorization: Bearer ...`
    Bearer(String),

    /// 세션 쿠키
    Cookie(String),
}

impl TokenKind {
    /// HTTP 헤더에서 토큰 추출
    ///
    /// # 추출 우선순위
    /// 1. `Authorization: Bearer ...`
    /// 2. `Cookie: dg_session=...`
    pub fn from_headers(auth_header: Option<&str>, cookie_header: Option<&str>) -> Option<Self> {
        // 1. Authorization 헤더 우선
        if let Some(value) = auth_header {
            if let Some(token) = value.strip_prefix("Bearer ") {
                let token = token.trim();
                if !token.is_empty() {
                    return Some(TokenKind::Bearer(token.to_string()));
                }
            }
        }

        // 2. 세션 쿠키
        cookie_header
            .and_then(|header| find_cookie(header, SESSION_COOKIE))
            .map(|value| TokenKind::Cookie(value.to_string()))
    }

    pub fn value(&self) -> &str {
        match self {
            TokenKind::Bearer(token) | TokenKind::Cookie(token) => token,
        }
    }
}

fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then_some(value)
    })
}

/// 서명 없는 개발용 토큰 resolver
///
/// 지원 형식:
/// - `json:<json>`
/// - base64url (no padding) 또는 base64 인코딩된 JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct DevTokenResolver;

impl DevTokenResolver {
    pub fn new() -> Self {
        Self
    }

    /// 토큰 문자열을 claims로 디코딩
    pub fn decode(&self, token: &str) -> Result<PrincipalClaims> {
        let token = token.trim();

        // 1) json: prefix
        if let Some(raw) = token.strip_prefix("json:") {
            return Ok(serde_json::from_str(raw)?);
        }

        // 2) base64url (no padding) -> JSON
        if let Ok(bytes) = general_purpose::URL_SAFE_NO_PAD.decode(token) {
            if let Ok(claims) = serde_json::from_slice::<PrincipalClaims>(&bytes) {
                return Ok(claims);
            }
        }

        // 3) base64 (standard) -> JSON
        if let Ok(bytes) = general_purpose::STANDARD.decode(token) {
            if let Ok(claims) = serde_json::from_slice::<PrincipalClaims>(&bytes) {
                return Ok(claims);
            }
        }

        Err(Error::InvalidToken {
            reason: "unable to decode token".to_string(),
        })
    }
}

impl<R: Role> PrincipalResolver<R> for DevTokenResolver {
    fn resolve(&self, token: Option<&TokenKind>) -> Result<Principal<R>> {
        let Some(token) = token else {
            return Ok(Principal::Unauthenticated);
        };

        let claims = self.decode(token.value())?;
        if claims.is_expired() {
            return Err(Error::TokenExpired);
        }
        if claims.sub.trim().is_empty() {
            return Err(Error::InvalidToken {
                reason: "missing subject".to_string(),
            });
        }

        Ok(Principal::from_claims(&claims))
    }
}

/// 개발용 토큰 생성 (base64url JSON)
pub fn encode_dev_token(claims: &PrincipalClaims) -> Result<String> {
    let json = serde_json::to_vec(claims)?;
    Ok(general_purpose::URL_SAFE_NO_PAD.encode(json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{AdminRole, InventoryRole};

    #[test]
    fn test_bearer_takes_priority() {
        let token = TokenKind::from_headers(Some("Bearer abc"), Some("dg_session=xyz"));
        assert_eq!(token, Some(TokenKind::Bearer("abc".to_string())));
    }

    #[test]
    fn test_cookie_fallback() {
        let token = TokenKind::from_headers(None, Some("theme=dark; dg_session=xyz; other=1"));
        assert_eq!(token, Some(TokenKind::Cookie("xyz".to_string())));

        assert_eq!(TokenKind::from_headers(Some("Basic abc"), Some("theme=dark")), None);
        assert_eq!(TokenKind::from_headers(Some("Bearer "), None), None);
    }

    #[test]
    fn test_decode_formats() {
        let resolver = DevTokenResolver::new();
        let claims = PrincipalClaims::new("user_1", Some("admin".to_string()));

        let from_json = resolver
            .decode(r#"json:{"sub":"user_1","role":"admin"}"#)
            .unwrap();
        assert_eq!(from_json, claims);

        let encoded = encode_dev_token(&claims).unwrap();
        assert_eq!(resolver.decode(&encoded).unwrap(), claims);

        let standard = general_purpose::STANDARD.encode(serde_json::to_vec(&claims).unwrap());
        assert_eq!(resolver.decode(&standard).unwrap(), claims);

        assert!(matches!(
            resolver.decode("not a token"),
            Err(Error::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_resolve_without_token() {
        let principal: Principal<AdminRole> = DevTokenResolver.resolve(None).unwrap();
        assert_eq!(principal, Principal::Unauthenticated);
    }

    #[test]
    fn test_resolve_expired_token() {
        let claims = PrincipalClaims::new("user_1", Some("viewer".to_string()))
            .with_ttl(-60)
            .unwrap();
        let token = TokenKind::Bearer(encode_dev_token(&claims).unwrap());

        let result: Result<Principal<InventoryRole>> = DevTokenResolver.resolve(Some(&token));
        assert!(matches!(result, Err(Error::TokenExpired)));
    }

    #[test]
    fn test_resolve_valid_token() {
        let claims = PrincipalClaims::new("user_1", Some("viewer".to_string()))
            .with_ttl(600)
            .unwrap();
        let token = TokenKind::Cookie(encode_dev_token(&claims).unwrap());

        let principal: Principal<InventoryRole> = DevTokenResolver.resolve(Some(&token)).unwrap();
        assert_eq!(principal.role(), Some(InventoryRole::Viewer));
    }
}
