//! Inventory 백엔드 앱 상태

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use dg_core::policy::RolePolicy;
use dg_core::roles::InventoryRole;
use dg_web::middleware::SharedResolver;

/// 재고 품목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: u64,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 인메모리 품목 저장소
#[derive(Debug, Default)]
pub struct ItemStore {
    items: BTreeMap<u64, Item>,
    next_id: u64,
}

impl ItemStore {
    pub fn seeded() -> Self {
        let mut store = Self::default();
        for (sku, name, quantity, location) in [
            ("INV-1001", "Pallet Jack", 4, "Dock A"),
            ("INV-1002", "Shrink Wrap", 120, "Aisle 3"),
            ("INV-1003", "Barcode Scanner", 9, "Office"),
        ] {
            store.insert(sku, name, quantity, Some(location.to_string()));
        }
        store
    }

    pub fn list(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }

    pub fn get(&self, id: u64) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    pub fn sku_exists(&self, sku: &str) -> bool {
        self.items.values().any(|item| item.sku == sku)
    }

    pub fn insert(
        &mut self,
        sku: &str,
        name: &str,
        quantity: i64,
        location: Option<String>,
    ) -> Item {
        self.next_id += 1;
        let now = Utc::now();
        let item = Item {
            id: self.next_id,
            sku: sku.to_string(),
            name: name.to_string(),
            quantity,
            location,
            created_at: now,
            updated_at: now,
        };
        self.items.insert(item.id, item.clone());
        item
    }

    pub fn remove(&mut self, id: u64) -> Option<Item> {
        self.items.remove(&id)
    }
}

pub struct AppState {
    pub policy: RolePolicy<InventoryRole>,
    pub resolver: SharedResolver<InventoryRole>,
    pub items: RwLock<ItemStore>,
}

impl AppState {
    pub fn new(
        policy: RolePolicy<InventoryRole>,
        resolver: SharedResolver<InventoryRole>,
        items: ItemStore,
    ) -> Arc<Self> {
        Arc::new(Self {
            policy,
            resolver,
            items: RwLock::new(items),
        })
    }
}
