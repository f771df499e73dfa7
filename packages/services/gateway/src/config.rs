//! Gateway 설정

use std::env;

use dg_core::routing::RouterSettings;
use dg_core::setting::parse_setting;
use dg_core::Result;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Gateway 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버 포트
    pub port: u16,

    /// 백엔드 요청 타임아웃 (초)
    pub request_timeout_secs: u64,

    /// 전달할 요청 본문 최대 크기
    pub max_body_bytes: usize,

    /// 백엔드 라우팅 설정
    pub router: RouterSettings,
}

impl Config {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            port: parse_setting(&lookup, "DG_GATEWAY_PORT", DEFAULT_PORT)?,
            request_timeout_secs: parse_setting(
                &lookup,
                "DG_GATEWAY_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?,
            max_body_bytes: parse_setting(
                &lookup,
                "DG_GATEWAY_MAX_BODY_BYTES",
                DEFAULT_MAX_BODY_BYTES,
            )?,
            router: RouterSettings::from_lookup(&lookup),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::Error;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(config.router.backends.iter().all(|b| b.is_fallback));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = Config::from_lookup(|name| {
            (name == "DG_GATEWAY_PORT").then(|| "eighty".to_string())
        })
        .unwrap_err();

        assert!(matches!(err, Error::InvalidSetting { ref name, .. } if name == "DG_GATEWAY_PORT"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_router_settings_from_same_lookup() {
        let config = Config::from_lookup(|name| {
            (name == "ADMIN_BACKEND_API_URL").then(|| "http://svc-a:4000".to_string())
        })
        .unwrap();

        assert_eq!(config.router.backends[0].base_url, "http://svc-a:4000");
    }
}
