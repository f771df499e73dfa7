//! Health check

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// 설정된 라우트 목록과 함께 상태 응답
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let routes: Vec<Value> = state
        .routes
        .rules()
        .iter()
        .map(|rule| json!({ "prefix": rule.api_root(), "target": rule.base_url }))
        .collect();

    Json(json!({ "ok": true, "routes": routes }))
}
