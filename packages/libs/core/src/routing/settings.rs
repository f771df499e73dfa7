//! 라우팅 설정
//!
//! 서비스별 base URL을 환경변수에서 읽습니다. 값이 없으면 고정된 로컬 주소를
//! 사용하고, 값이 잘못되었으면 기동을 중단합니다.

use super::table::{RouteRule, RouteTable};
use crate::error::Result;
use crate::setting::lookup_setting;

/// Admin 백엔드 prefix
pub const ADMIN_PREFIX: &str = "/admin";

/// Inventory 백엔드 prefix
pub const INVENTORY_PREFIX: &str = "/inventory";

pub const ADMIN_BACKEND_ENV: &str = "ADMIN_BACKEND_API_URL";
pub const INVENTORY_BACKEND_ENV: &str = "INVENTORY_BACKEND_API_URL";

pub const DEFAULT_ADMIN_BACKEND_URL: &str = "http://localhost:4000";
pub const DEFAULT_INVENTORY_BACKEND_URL: &str = "http://localhost:3000";

/// 백엔드 하나에 대한 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSetting {
    /// 환경변수 이름
    pub env: &'static str,

    /// 서비스 prefix
    pub prefix: &'static str,

    /// 사용할 base URL
    pub base_url: String,

    /// fallback 사용 여부
    pub is_fallback: bool,
}

/// 라우터 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterSettings {
    pub backends: Vec<BackendSetting>,
}

impl RouterSettings {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 임의의 조회 함수로 설정 로드 (테스트용)
    ///
    /// 빈 문자열은 설정되지 않은 것으로 취급합니다.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend = |env: &'static str, prefix: &'static str, fallback: &str| {
            match lookup_setting(&lookup, env) {
                Some(base_url) => BackendSetting {
                    env,
                    prefix,
                    base_url,
                    is_fallback: false,
                },
                None => BackendSetting {
                    env,
                    prefix,
                    base_url: fallback.to_string(),
                    is_fallback: true,
                },
            }
        };

        Self {
            backends: vec![
                backend(ADMIN_BACKEND_ENV, ADMIN_PREFIX, DEFAULT_ADMIN_BACKEND_URL),
                backend(
                    INVENTORY_BACKEND_ENV,
                    INVENTORY_PREFIX,
                    DEFAULT_INVENTORY_BACKEND_URL,
                ),
            ],
        }
    }

    /// 검증 후 라우팅 테이블 생성
    pub fn build_table(&self) -> Result<RouteTable> {
        let rules = self
            .backends
            .iter()
            .map(|backend| RouteRule::new(backend.env, backend.prefix, &backend.base_url))
            .collect::<Result<Vec<_>>>()?;

        for backend in &self.backends {
            if backend.is_fallback {
                tracing::info!(
                    env = backend.env,
                    base_url = %backend.base_url,
                    "backend URL not set, using fallback"
                );
            }
        }

        RouteTable::new(rules)
    }
}
