//! Admin 백엔드 앱 상태

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use dg_core::policy::RolePolicy;
use dg_core::roles::AdminRole;
use dg_web::middleware::SharedResolver;

/// 재고 부족 기준 수량
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// 대시보드 운영자 계정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
}

/// 재고 품목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub updated_at: DateTime<Utc>,
}

/// 인메모리 저장소
///
/// ORM 계층이 붙기 전까지 핸들러가 사용하는 저장소입니다.
#[derive(Debug, Default)]
pub struct Store {
    pub users: BTreeMap<u64, User>,
    pub stock: BTreeMap<String, StockItem>,
}

impl Store {
    /// 로컬 실행용 초기 데이터
    pub fn seeded() -> Self {
        let now = Utc::now();
        let mut store = Self::default();

        for (id, name, email, role) in [
            (1, "Ada Park", "ada@example.com", AdminRole::SuperAdmin),
            (2, "Ben Kim", "ben@example.com", AdminRole::Admin),
            (3, "Cho Lee", "cho@example.com", AdminRole::InventoryAdmin),
        ] {
            store.users.insert(
                id,
                User {
                    id,
                    name: name.to_string(),
                    email: email.to_string(),
                    role,
                    created_at: now,
                },
            );
        }

        for (sku, name, quantity) in [
            ("SKU-001", "Desk Lamp", 42),
            ("SKU-002", "Office Chair", 3),
            ("SKU-003", "Monitor Arm", 17),
        ] {
            store.stock.insert(
                sku.to_string(),
                StockItem {
                    sku: sku.to_string(),
                    name: name.to_string(),
                    quantity,
                    updated_at: now,
                },
            );
        }

        store
    }
}

/// 앱 상태
///
/// 정책과 resolver는 기동 후 읽기 전용입니다.
pub struct AppState {
    /// 권한 정책
    pub policy: RolePolicy<AdminRole>,

    /// Principal resolver
    pub resolver: SharedResolver<AdminRole>,

    /// 저장소
    pub store: RwLock<Store>,
}

impl AppState {
    pub fn new(
        policy: RolePolicy<AdminRole>,
        resolver: SharedResolver<AdminRole>,
        store: Store,
    ) -> Arc<Self> {
        Arc::new(Self {
            policy,
            resolver,
            store: RwLock::new(store),
        })
    }
}
