//! 요약 리포트

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use serde::Serialize;

use dg_web::{ApiResponse, Result};

use crate::state::{AppState, LOW_STOCK_THRESHOLD};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub users_by_role: BTreeMap<String, usize>,
    pub total_units: i64,
    pub low_stock: Vec<String>,
}

pub async fn summary(State(state): State<Arc<AppState>>) -> Result<ApiResponse<Summary>> {
    let store = state.store.read().await;

    let mut users_by_role = BTreeMap::new();
    for user in store.users.values() {
        *users_by_role.entry(user.role.to_string()).or_insert(0) += 1;
    }

    Ok(ApiResponse::ok(Summary {
        users_by_role,
        total_units: store.stock.values().map(|item| item.quantity).sum(),
        low_stock: store
            .stock
            .values()
            .filter(|item| item.quantity < LOW_STOCK_THRESHOLD)
            .map(|item| item.sku.clone())
            .collect(),
    }))
}
