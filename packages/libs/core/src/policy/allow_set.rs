//! 허용 role 집합

use std::collections::HashSet;
use std::fmt;

use crate::roles::{AdminRole, Role};

/// 하나의 operation을 호출할 수 있는 role 집합
///
/// 계층 관계는 없습니다. 상위 role도 집합에 명시적으로 포함되어야 통과합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowSet<R: Role> {
    roles: HashSet<R>,
}

impl<R: Role> AllowSet<R> {
    /// role 목록으로 생성 (중복은 무시)
    pub fn from_roles(roles: impl IntoIterator<Item = R>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
        }
    }

    /// 포함 여부
    pub fn contains(&self, role: R) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// 선언 순서로 정렬된 role 목록
    pub fn roles(&self) -> Vec<R> {
        let mut roles: Vec<R> = self.roles.iter().copied().collect();
        roles.sort_by_key(|role| role.ordinal());
        roles
    }
}

impl AllowSet<AdminRole> {
    /// admin 계열 role 전체 (`superadmin`, `admin`, `inventory_admin`)
    pub fn any_admin() -> Self {
        Self::from_roles([
            AdminRole::SuperAdmin,
            AdminRole::Admin,
            AdminRole::InventoryAdmin,
        ])
    }

    /// `superadmin` 전용
    pub fn super_admin_only() -> Self {
        Self::from_roles([AdminRole::SuperAdmin])
    }
}

impl<R: Role> FromIterator<R> for AllowSet<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::from_roles(iter)
    }
}

impl<R: Role> fmt::Display for AllowSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.roles().iter().map(|role| role.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::InventoryRole;

    #[test]
    fn test_named_sets() {
        let any = AllowSet::any_admin();
        assert!(any.contains(AdminRole::SuperAdmin));
        assert!(any.contains(AdminRole::Admin));
        assert!(any.contains(AdminRole::InventoryAdmin));

        let sup = AllowSet::super_admin_only();
        assert!(sup.contains(AdminRole::SuperAdmin));
        assert!(!sup.contains(AdminRole::Admin));
        assert!(!sup.contains(AdminRole::InventoryAdmin));
    }

    #[test]
    fn test_display_in_declaration_order() {
        let set = AllowSet::from_roles([AdminRole::InventoryAdmin, AdminRole::SuperAdmin]);
        assert_eq!(set.to_string(), "superadmin, inventory_admin");
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = AllowSet::from_roles([InventoryRole::Viewer, InventoryRole::Viewer]);
        assert_eq!(set.len(), 1);
    }
}
