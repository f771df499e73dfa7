//! 재고 조회 및 수량 조정

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use dg_web::{ApiError, ApiResponse, Result};

use crate::state::{AppState, StockItem};

pub async fn list_stock(State(state): State<Arc<AppState>>) -> Result<ApiResponse<Vec<StockItem>>> {
    let store = state.store.read().await;
    Ok(ApiResponse::ok(store.stock.values().cloned().collect()))
}

#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    /// 증감량 (음수 = 출고)
    pub delta: i64,
}

pub async fn adjust_stock(
    State(state): State<Arc<AppState>>,
    Path(sku): Path<String>,
    Json(request): Json<AdjustRequest>,
) -> Result<ApiResponse<StockItem>> {
    let mut store = state.store.write().await;
    let item = store
        .stock
        .get_mut(&sku)
        .ok_or_else(|| ApiError::not_found(format!("Item {} not found", sku)))?;

    let quantity = item
        .quantity
        .checked_add(request.delta)
        .filter(|q| *q >= 0)
        .ok_or_else(|| {
            ApiError::bad_request(format!(
                "Adjustment of {} would make stock for {} negative",
                request.delta, sku
            ))
        })?;

    item.quantity = quantity;
    item.updated_at = Utc::now();
    Ok(ApiResponse::ok(item.clone()))
}
