//! 품목 CRUD

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use dg_web::{ApiError, ApiResponse, Result};

use crate::state::{AppState, Item};

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    pub location: Option<String>,
}

/// 부분 수정. 빠진 필드는 유지됩니다.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub location: Option<String>,
}

fn validate_quantity(quantity: i64) -> Result<()> {
    if quantity < 0 {
        return Err(ApiError::bad_request("Quantity must not be negative"));
    }
    Ok(())
}

fn item_not_found(id: u64) -> ApiError {
    ApiError::not_found(format!("Item {} not found", id))
}

pub async fn list_items(State(state): State<Arc<AppState>>) -> Result<ApiResponse<Vec<Item>>> {
    Ok(ApiResponse::ok(state.items.read().await.list()))
}

pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<ApiResponse<Item>> {
    let items = state.items.read().await;
    items
        .get(id)
        .cloned()
        .map(ApiResponse::ok)
        .ok_or_else(|| item_not_found(id))
}

pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateItemRequest>,
) -> Result<ApiResponse<Item>> {
    let sku = request.sku.trim();
    let name = request.name.trim();
    if sku.is_empty() || name.is_empty() {
        return Err(ApiError::bad_request("sku and name are required"));
    }
    validate_quantity(request.quantity)?;

    let mut items = state.items.write().await;
    if items.sku_exists(sku) {
        return Err(ApiError::bad_request(format!("SKU {} already exists", sku)));
    }

    let item = items.insert(sku, name, request.quantity, request.location);
    tracing::info!(id = item.id, sku = %item.sku, "created item");
    Ok(ApiResponse::created(item))
}

pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<ApiResponse<Item>> {
    if let Some(quantity) = request.quantity {
        validate_quantity(quantity)?;
    }

    let mut items = state.items.write().await;
    let item = items.get_mut(id).ok_or_else(|| item_not_found(id))?;

    if let Some(name) = request.name.as_deref().map(str::trim) {
        if name.is_empty() {
            return Err(ApiError::bad_request("name must not be empty"));
        }
        item.name = name.to_string();
    }
    if let Some(quantity) = request.quantity {
        item.quantity = quantity;
    }
    if request.location.is_some() {
        item.location = request.location;
    }
    item.updated_at = Utc::now();

    Ok(ApiResponse::ok(item.clone()))
}

pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<ApiResponse<Item>> {
    let removed = state
        .items
        .write()
        .await
        .remove(id)
        .ok_or_else(|| item_not_found(id))?;

    tracing::info!(id, sku = %removed.sku, "deleted item");
    Ok(ApiResponse::ok(removed))
}
