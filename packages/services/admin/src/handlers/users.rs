//! 운영자 계정 관리

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;

use dg_core::auth::Principal;
use dg_core::roles::AdminRole;
use dg_web::{ApiError, ApiResponse, Result};

use crate::state::{AppState, User};

pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<ApiResponse<Vec<User>>> {
    let store = state.store.read().await;
    Ok(ApiResponse::ok(store.users.values().cloned().collect()))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<ApiResponse<User>> {
    let store = state.store.read().await;
    store
        .users
        .get(&id)
        .cloned()
        .map(ApiResponse::ok)
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: AdminRole,
}

pub async fn update_user_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<ApiResponse<User>> {
    let mut store = state.store.write().await;
    let user = store
        .users
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;

    tracing::info!(user = id, from = %user.role, to = %request.role, "changing user role");
    user.role = request.role;
    Ok(ApiResponse::ok(user.clone()))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal<AdminRole>>,
    Path(id): Path<u64>,
) -> Result<ApiResponse<User>> {
    if principal.id().is_some_and(|current| current.0 == id.to_string()) {
        return Err(ApiError::bad_request("You cannot delete your own account"));
    }

    let mut store = state.store.write().await;
    let removed = store
        .users
        .remove(&id)
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;

    tracing::info!(user = id, "deleted user");
    Ok(ApiResponse::ok(removed))
}
