//! Inventory 백엔드 설정

use std::env;
use std::path::PathBuf;

use dg_core::setting::{lookup_setting, parse_setting};
use dg_core::Result;

pub const DEFAULT_PORT: u16 = 3000;

const PORT_ENV: &str = "DG_INVENTORY_PORT";
const POLICY_FILE_ENV: &str = "DG_INVENTORY_POLICY_FILE";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,

    /// 정책 덮어쓰기 YAML 파일
    pub policy_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            port: parse_setting(&lookup, PORT_ENV, DEFAULT_PORT)?,
            policy_file: lookup_setting(&lookup, POLICY_FILE_ENV).map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::Error;

    #[test]
    fn test_from_lookup() {
        let config = Config::from_lookup(|name| match name {
            "DG_INVENTORY_PORT" => Some("3100".to_string()),
            "DG_INVENTORY_POLICY_FILE" => Some("/etc/dashgate/inventory.yaml".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.port, 3100);
        assert_eq!(
            config.policy_file,
            Some(PathBuf::from("/etc/dashgate/inventory.yaml"))
        );
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = Config::from_lookup(|_| Some("  ".to_string())).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.policy_file.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(|name| (name == PORT_ENV).then(|| "http".to_string()));
        assert!(matches!(result, Err(Error::InvalidSetting { .. })));
    }
}
