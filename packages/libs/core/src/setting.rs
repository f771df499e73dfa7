//! 환경변수 설정값 파싱
//!
//! 모든 서비스가 같은 규칙을 씁니다. 공백뿐인 값은 설정되지 않은 것으로
//! 보고, 파싱할 수 없는 값은 설정 에러로 기동을 중단합니다.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, Result};

/// 앞뒤 공백을 제거한 값. 비어 있으면 `None`.
pub fn lookup_setting(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// 값이 없으면 `default`, 잘못된 값이면 `InvalidSetting`
pub fn parse_setting<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup_setting(lookup, name) {
        Some(value) => value.parse().map_err(|e: T::Err| Error::InvalidSetting {
            name: name.to_string(),
            value,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
