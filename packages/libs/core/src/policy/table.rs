//! Operation별 권한 테이블

use std::collections::btree_map::{BTreeMap, Entry};
use std::path::Path;

use super::allow_set::AllowSet;
use super::document::PolicyDocument;
use crate::error::{Error, Result};
use crate::gate::Gate;
use crate::roles::Role;

/// Operation 이름 → 허용 role 집합
///
/// 기동 시 한 번 만들어지고 이후에는 읽기 전용입니다. 빈 집합을 가진
/// operation은 만들 수 없습니다.
#[derive(Debug, Clone)]
pub struct RolePolicy<R: Role> {
    operations: BTreeMap<String, AllowSet<R>>,
}

/// [`RolePolicy`] 빌더
#[derive(Debug)]
pub struct RolePolicyBuilder<R: Role> {
    entries: Vec<(String, AllowSet<R>)>,
}

impl<R: Role> Default for RolePolicyBuilder<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<R: Role> RolePolicyBuilder<R> {
    /// operation 등록
    pub fn allow(mut self, operation: impl Into<String>, roles: AllowSet<R>) -> Self {
        self.entries.push((operation.into(), roles));
        self
    }

    /// 검증 후 정책 생성
    pub fn build(self) -> Result<RolePolicy<R>> {
        let mut operations = BTreeMap::new();
        for (operation, roles) in self.entries {
            if roles.is_empty() {
                return Err(Error::EmptyAllowSet { operation });
            }
            match operations.entry(operation) {
                Entry::Occupied(entry) => {
                    return Err(Error::DuplicateOperation {
                        operation: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(roles);
                }
            }
        }
        Ok(RolePolicy { operations })
    }
}

impl<R: Role> RolePolicy<R> {
    pub fn builder() -> RolePolicyBuilder<R> {
        RolePolicyBuilder::default()
    }

    /// 문자열 role로 허용 여부 확인
    ///
    /// 이 정책의 role 타입으로 파싱되지 않는 role, 등록되지 않은 operation은
    /// 모두 false입니다.
    pub fn is_allowed(&self, role: &str, operation: &str) -> bool {
        R::parse(role).is_some_and(|role| self.allows(role, operation))
    }

    /// 타입이 정해진 role로 허용 여부 확인
    pub fn allows(&self, role: R, operation: &str) -> bool {
        self.operations
            .get(operation)
            .is_some_and(|roles| roles.contains(role))
    }

    pub fn allow_set(&self, operation: &str) -> Option<&AllowSet<R>> {
        self.operations.get(operation)
    }

    /// operation에 묶인 gate 생성
    pub fn gate(&self, operation: &str) -> Result<Gate<R>> {
        self.allow_set(operation)
            .cloned()
            .map(Gate::require_role)
            .ok_or_else(|| Error::UndeclaredOperation {
                operation: operation.to_string(),
            })
    }

    /// 이름순 operation 목록
    pub fn operations(&self) -> impl Iterator<Item = (&str, &AllowSet<R>)> {
        self.operations
            .iter()
            .map(|(name, roles)| (name.as_str(), roles))
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// 문서에 명시된 operation의 허용 집합을 교체
    ///
    /// 기본 정책에 없는 operation은 받아들이지 않습니다.
    pub fn with_overrides(mut self, document: &PolicyDocument) -> Result<Self> {
        for (operation, roles) in document.resolve::<R>()? {
            match self.operations.get_mut(&operation) {
                Some(current) => {
                    tracing::info!(
                        universe = R::UNIVERSE,
                        operation = %operation,
                        from = %current,
                        to = %roles,
                        "overriding operation allow-set"
                    );
                    *current = roles;
                }
                None => return Err(Error::UndeclaredOperation { operation }),
            }
        }
        Ok(self)
    }

    /// 파일이 지정되면 덮어쓰기 적용
    pub fn with_override_file(self, path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "applying policy overrides");
                self.with_overrides(&PolicyDocument::from_path(path)?)
            }
            None => Ok(self),
        }
    }
}
