//! Role 정의
//!
//! 두 애플리케이션은 서로 독립된 role 집합을 가집니다. 같은 문자열(`admin`)이
//! 양쪽에 존재하더라도 타입이 다르므로 섞어서 평가할 수 없습니다.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 하나의 애플리케이션이 사용하는 닫힌 role 열거형
pub trait Role: Copy + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// role 집합 이름 (에러/로그용)
    const UNIVERSE: &'static str;

    /// 선언 순서대로 정렬된 전체 role 목록
    fn all() -> &'static [Self];

    /// wire 문자열
    fn as_str(&self) -> &'static str;

    /// 문자열에서 파싱 (대소문자 구분, 정확히 일치해야 함)
    fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|role| role.as_str() == s)
    }

    /// 선언 순서 인덱스
    fn ordinal(&self) -> usize {
        Self::all()
            .iter()
            .position(|role| role == self)
            .unwrap_or(usize::MAX)
    }
}

/// Admin 애플리케이션 role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    InventoryAdmin,
}

impl Role for AdminRole {
    const UNIVERSE: &'static str = "admin";

    fn all() -> &'static [Self] {
        &[AdminRole::SuperAdmin, AdminRole::Admin, AdminRole::InventoryAdmin]
    }

    fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "superadmin",
            AdminRole::Admin => "admin",
            AdminRole::InventoryAdmin => "inventory_admin",
        }
    }
}

/// Inventory 애플리케이션 role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryRole {
    Admin,
    Viewer,
}

impl Role for InventoryRole {
    const UNIVERSE: &'static str = "inventory";

    fn all() -> &'static [Self] {
        &[InventoryRole::Admin, InventoryRole::Viewer]
    }

    fn as_str(&self) -> &'static str {
        match self {
            InventoryRole::Admin => "admin",
            InventoryRole::Viewer => "viewer",
        }
    }
}

macro_rules! impl_role_wire {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let value = String::deserialize(deserializer)?;
                <$ty as Role>::parse(&value).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "unknown {} role: '{}'",
                        <$ty as Role>::UNIVERSE,
                        value
                    ))
                })
            }
        }
    };
}

impl_role_wire!(AdminRole);
impl_role_wire!(InventoryRole);
