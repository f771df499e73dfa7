//! Admin API 핸들러
//!
//! 모든 핸들러는 인가 게이트를 통과한 뒤에만 호출됩니다.

pub mod inventory;
pub mod reports;
pub mod users;

use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({ "ok": true }))
}
