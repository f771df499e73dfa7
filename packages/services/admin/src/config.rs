//! Admin 백엔드 설정

use std::env;
use std::path::PathBuf;

use dg_core::setting::{lookup_setting, parse_setting};
use dg_core::Result;

pub const DEFAULT_PORT: u16 = 4000;

/// Admin 백엔드 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 서버 포트
    pub port: u16,

    /// 정책 덮어쓰기 YAML 파일
    pub policy_file: Option<PathBuf>,
}

impl Config {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            port: parse_setting(&lookup, "DG_ADMIN_PORT", DEFAULT_PORT)?,
            policy_file: lookup_setting(&lookup, "DG_ADMIN_POLICY_FILE").map(PathBuf::from),
        })
    }
}
