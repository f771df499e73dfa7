//! dashgate Inventory 백엔드

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use dg_core::auth::DevTokenResolver;
use dg_core::policy::defaults::inventory::*;
use dg_core::policy::inventory_policy;
use dg_core::roles::InventoryRole;
use dg_web::middleware::{guarded, resolve_principal, SharedResolver};

mod config;
mod handlers;
mod state;

use config::Config;
use state::{AppState, ItemStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    dg_web::telemetry::init_tracing(
        "dg_inventory=debug,dg_web=debug,dg_core=info,tower_http=debug",
    );

    let config = Config::from_env()?;
    let policy = inventory_policy()
        .and_then(|policy| policy.with_override_file(config.policy_file.as_deref()))
        .inspect_err(|e| {
            tracing::error!(code = e.code(), "invalid inventory policy: {}", e);
        })?;
    tracing::info!(operations = policy.len(), "inventory policy loaded");

    tracing::warn!("using development token resolver; tokens are not signature-checked");
    let resolver: SharedResolver<InventoryRole> = Arc::new(DevTokenResolver::new());

    let app = create_router(AppState::new(policy, resolver, ItemStore::seeded()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Inventory API listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(state: Arc<AppState>) -> dg_core::Result<Router> {
    use handlers::items;

    let policy = &state.policy;

    let api = Router::new()
        .route(
            "/items",
            guarded(policy, ITEMS_LIST, get(items::list_items))?
                .merge(guarded(policy, ITEMS_CREATE, post(items::create_item))?),
        )
        .route(
            "/items/{id}",
            guarded(policy, ITEMS_READ, get(items::get_item))?
                .merge(guarded(policy, ITEMS_UPDATE, patch(items::update_item))?)
                .merge(guarded(policy, ITEMS_DELETE, delete(items::delete_item))?),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/inventory/api", api)
        .layer(from_fn_with_state(
            state.resolver.clone(),
            resolve_principal::<InventoryRole>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(dg_web::middleware::request_id))
        .with_state(state))
}
