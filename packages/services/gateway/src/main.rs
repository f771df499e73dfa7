//! dashgate Gateway
//!
//! `/admin/api/*`, `/inventory/api/*` 요청을 각 백엔드로 전달하는 reverse proxy입니다.
//! 라우팅 설정이 잘못되었으면 포트를 열기 전에 종료합니다.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod handlers;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화
    dg_web::telemetry::init_tracing("dg_gateway=debug,dg_core=info,tower_http=debug");

    // 설정 로드 및 검증
    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(code = e.code(), "invalid gateway configuration: {}", e);
    })?;
    let state = AppState::new(&config).inspect_err(|e| {
        tracing::error!("failed to initialize gateway: {:#}", e);
    })?;
    for rule in state.routes.rules() {
        tracing::info!("route {}/* -> {}", rule.api_root(), rule.base_url);
    }
    let state = Arc::new(state);

    // 라우터 구성
    let app = create_router(state);

    // 서버 시작
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Gateway listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// 라우터 생성
fn create_router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))
        // 나머지는 모두 proxy 대상 여부를 판단
        .fallback(handlers::proxy::proxy)
        // Middleware
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(from_fn(dg_web::middleware::request_id))
        // State
        .with_state(state)
}
