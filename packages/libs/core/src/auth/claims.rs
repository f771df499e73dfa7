//! Principal Claims
//!
//! 외부 인증 계층이 발급한 토큰의 페이로드 구조입니다. 서명 검증은 이
//! 크레이트의 범위가 아니며, 여기서는 role claim과 만료만 다룹니다.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 세션 쿠키 이름
pub const SESSION_COOKIE: &str = "dg_session";

/// 토큰 Claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipalClaims {
    /// Subject (사용자 ID)
    pub sub: String,

    /// Role claim (애플리케이션별 role 이름)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// 만료 시각
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<DateTime<Utc>>,
}

impl PrincipalClaims {
    /// 새 claims 생성
    pub fn new(sub: impl Into<String>, role: Option<String>) -> Self {
        Self {
            sub: sub.into(),
            role,
            exp: None,
        }
    }

    /// 만료 시각 설정 (지금부터 `ttl_seconds` 후)
    ///
    /// 표현할 수 없는 시각이 되는 값은 에러입니다.
    pub fn with_ttl(mut self, ttl_seconds: i64) -> Result<Self> {
        let exp = Duration::try_seconds(ttl_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| Error::InvalidSetting {
                name: "ttl".to_string(),
                value: ttl_seconds.to_string(),
                reason: "expiry is out of range".to_string(),
            })?;
        self.exp = Some(exp);
        Ok(self)
    }

    /// 만료 여부 확인. `exp`가 없으면 만료되지 않음.
    pub fn is_expired(&self) -> bool {
        self.exp.is_some_and(|exp| Utc::now() > exp)
    }

    /// 공백을 제거한 role claim. 비어 있으면 None.
    pub fn role_claim(&self) -> Option<&str> {
        self.role
            .as_deref()
            .map(str::trim)
            .filter(|role| !role.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let claims = PrincipalClaims::new("user_123", Some("admin".to_string()));
        assert!(!claims.is_expired());

        let claims = claims.with_ttl(3600).unwrap();
        assert!(!claims.is_expired());

        let claims = PrincipalClaims::new("user_123", None).with_ttl(-10).unwrap();
        assert!(claims.is_expired());
    }

    #[test]
    fn test_ttl_out_of_range() {
        for ttl in [i64::MAX, i64::MIN, 9_000_000_000_000] {
            let result = PrincipalClaims::new("u", None).with_ttl(ttl);
            assert!(
                matches!(result, Err(Error::InvalidSetting { ref name, .. }) if name == "ttl"),
                "ttl {ttl} should be rejected"
            );
        }
    }

    #[test]
    fn test_role_claim_normalization() {
        assert_eq!(
            PrincipalClaims::new("u", Some(" viewer ".to_string())).role_claim(),
            Some("viewer")
        );
        assert_eq!(PrincipalClaims::new("u", Some("  ".to_string())).role_claim(), None);
        assert_eq!(PrincipalClaims::new("u", None).role_claim(), None);
    }

    #[test]
    fn test_optional_fields_skipped() {
        let json = serde_json::to_string(&PrincipalClaims::new("u", None)).unwrap();
        assert_eq!(json, r#"{"sub":"u"}"#);
    }
}
