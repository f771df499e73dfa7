//! 애플리케이션별 기본 정책
//!
//! `inventory_admin`은 일부 operation에서만 `admin`과 같은 권한을 가집니다.
//! 계층을 추론하지 않고 operation마다 허용 집합을 그대로 선언합니다.

use super::allow_set::AllowSet;
use super::table::RolePolicy;
use crate::error::Result;
use crate::roles::{AdminRole, InventoryRole};

/// Admin 애플리케이션 operation
pub mod admin {
    pub const USERS_LIST: &str = "users.list";
    pub const USERS_READ: &str = "users.read";
    pub const USERS_UPDATE_ROLE: &str = "users.update_role";
    pub const USERS_DELETE: &str = "users.delete";
    pub const INVENTORY_LIST: &str = "inventory.list";
    pub const INVENTORY_ADJUST: &str = "inventory.adjust";
    pub const REPORTS_READ: &str = "reports.read";
}

/// Inventory 애플리케이션 operation
pub mod inventory {
    pub const ITEMS_LIST: &str = "items.list";
    pub const ITEMS_READ: &str = "items.read";
    pub const ITEMS_CREATE: &str = "items.create";
    pub const ITEMS_UPDATE: &str = "items.update";
    pub const ITEMS_DELETE: &str = "items.delete";
}

/// Admin 기본 정책
pub fn admin_policy() -> Result<RolePolicy<AdminRole>> {
    use admin::*;

    let stock_roles = AllowSet::from_roles([
        AdminRole::SuperAdmin,
        AdminRole::Admin,
        AdminRole::InventoryAdmin,
    ]);

    RolePolicy::builder()
        .allow(USERS_LIST, AllowSet::any_admin())
        .allow(USERS_READ, AllowSet::any_admin())
        .allow(USERS_UPDATE_ROLE, AllowSet::super_admin_only())
        .allow(USERS_DELETE, AllowSet::super_admin_only())
        .allow(INVENTORY_LIST, stock_roles.clone())
        .allow(INVENTORY_ADJUST, stock_roles)
        .allow(
            REPORTS_READ,
            AllowSet::from_roles([AdminRole::SuperAdmin, AdminRole::Admin]),
        )
        .build()
}

/// Inventory 기본 정책
pub fn inventory_policy() -> Result<RolePolicy<InventoryRole>> {
    use inventory::*;

    let readers = AllowSet::from_roles([InventoryRole::Admin, InventoryRole::Viewer]);
    let writers = AllowSet::from_roles([InventoryRole::Admin]);

    RolePolicy::builder()
        .allow(ITEMS_LIST, readers.clone())
        .allow(ITEMS_READ, readers)
        .allow(ITEMS_CREATE, writers.clone())
        .allow(ITEMS_UPDATE, writers.clone())
        .allow(ITEMS_DELETE, writers)
        .build()
}
