//! Inventory API 핸들러

pub mod items;

use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({ "ok": true }))
}
