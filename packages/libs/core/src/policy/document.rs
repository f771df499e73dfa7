//! YAML 정책 문서
//!
//! ```yaml
//! operations:
//!   users.list: [superadmin, admin, inventory_admin]
//!   users.delete: [superadmin]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::allow_set::AllowSet;
use super::table::RolePolicy;
use crate::error::{Error, Result};
use crate::roles::Role;

/// 파싱된 정책 문서 (role 이름은 아직 문자열)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// operation → role 이름 목록
    #[serde(default)]
    pub operations: BTreeMap<String, Vec<String>>,
}

impl PolicyDocument {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// role 이름을 role 타입으로 변환
    ///
    /// 해당 애플리케이션에 없는 role 이름은 설정 에러입니다.
    pub fn resolve<R: Role>(&self) -> Result<Vec<(String, AllowSet<R>)>> {
        self.operations
            .iter()
            .map(|(operation, names)| {
                let roles = names
                    .iter()
                    .map(|name| {
                        R::parse(name).ok_or_else(|| Error::UnknownRole {
                            universe: R::UNIVERSE,
                            role: name.clone(),
                        })
                    })
                    .collect::<Result<AllowSet<R>>>()?;
                Ok((operation.clone(), roles))
            })
            .collect()
    }

    /// 문서만으로 정책 생성
    pub fn into_policy<R: Role>(&self) -> Result<RolePolicy<R>> {
        self.resolve::<R>()?
            .into_iter()
            .fold(RolePolicy::builder(), |builder, (operation, roles)| {
                builder.allow(operation, roles)
            })
            .build()
    }

    /// 정책을 문서 형태로 변환 (CLI 출력용)
    pub fn from_policy<R: Role>(policy: &RolePolicy<R>) -> Self {
        let operations = policy
            .operations()
            .map(|(name, roles)| {
                (
                    name.to_string(),
                    roles.roles().iter().map(|r| r.as_str().to_string()).collect(),
                )
            })
            .collect();
        Self { operations }
    }
}
