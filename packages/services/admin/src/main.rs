//! dashgate Admin 백엔드
//!
//! `/admin/api/*` 전체에 admin 접근 게이트를 걸고, 그 안에서 operation별
//! 게이트를 한 번 더 적용합니다.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use dg_core::auth::DevTokenResolver;
use dg_core::policy::admin_policy;
use dg_core::policy::defaults::admin::*;
use dg_core::roles::AdminRole;
use dg_web::middleware::{guard, guarded, resolve_principal, GuardedOperation, SharedResolver};

mod config;
mod handlers;
mod state;

use config::Config;
use state::{AppState, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화
    dg_web::telemetry::init_tracing("dg_admin=debug,dg_web=debug,dg_core=info,tower_http=debug");

    // 설정 및 정책 로드 (실패하면 기동하지 않음)
    let config = Config::from_env()?;
    let policy = admin_policy()
        .and_then(|policy| policy.with_override_file(config.policy_file.as_deref()))
        .inspect_err(|e| {
            tracing::error!(code = e.code(), "invalid admin policy: {}", e);
        })?;
    for (operation, roles) in policy.operations() {
        tracing::debug!("policy {} -> [{}]", operation, roles);
    }

    tracing::warn!("using development token resolver; tokens are not signature-checked");
    let resolver: SharedResolver<AdminRole> = Arc::new(DevTokenResolver::new());

    let state = AppState::new(policy, resolver, Store::seeded());
    let app = create_router(state)?;

    // 서버 시작
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Admin API listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// 라우터 생성
///
/// 정책에 없는 operation을 라우트에 걸면 설정 에러입니다.
fn create_router(state: Arc<AppState>) -> dg_core::Result<Router> {
    use handlers::{inventory, reports, users};

    let policy = &state.policy;

    let api = Router::new()
        .route("/users", guarded(policy, USERS_LIST, get(users::list_users))?)
        .route(
            "/users/{id}",
            guarded(policy, USERS_READ, get(users::get_user))?
                .merge(guarded(policy, USERS_DELETE, delete(users::delete_user))?),
        )
        .route(
            "/users/{id}/role",
            guarded(policy, USERS_UPDATE_ROLE, patch(users::update_user_role))?,
        )
        .route("/inventory", guarded(policy, INVENTORY_LIST, get(inventory::list_stock))?)
        .route(
            "/inventory/{sku}/adjust",
            guarded(policy, INVENTORY_ADJUST, post(inventory::adjust_stock))?,
        )
        .route("/reports/summary", guarded(policy, REPORTS_READ, get(reports::summary))?)
        // 일괄 admin 접근 게이트 (operation 게이트보다 먼저 실행)
        .route_layer(from_fn_with_state(
            GuardedOperation::admin_access(),
            guard::<AdminRole>,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/admin/api", api)
        .layer(from_fn_with_state(
            state.resolver.clone(),
            resolve_principal::<AdminRole>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(dg_web::middleware::request_id))
        .with_state(state))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use dg_core::auth::{encode_dev_token, PrincipalClaims};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        let resolver: SharedResolver<AdminRole> = Arc::new(DevTokenResolver::new());
        let state = AppState::new(admin_policy().unwrap(), resolver, Store::seeded());
        create_router(state).unwrap()
    }

    fn token(sub: &str, role: &str) -> String {
        let claims = PrincipalClaims::new(sub, Some(role.to_string()))
            .with_ttl(600)
            .unwrap();
        format!("Bearer {}", encode_dev_token(&claims).unwrap())
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        auth: Option<String>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_unauthenticated_rejected() {
        let app = app();
        let (status, body) = send(&app, "GET", "/admin/api/users", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_non_admin_role_gets_admin_access_message() {
        let app = app();
        let (status, body) = send(
            &app,
            "GET",
            "/admin/api/users",
            Some(token("9", "viewer")),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Access denied. Admin privileges required.");
    }

    #[tokio::test]
    async fn test_inventory_admin_can_list_users() {
        let app = app();
        let (status, body) = send(
            &app,
            "GET",
            "/admin/api/users",
            Some(token("3", "inventory_admin")),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_inventory_admin_cannot_read_reports() {
        let app = app();
        let (status, body) = send(
            &app,
            "GET",
            "/admin/api/reports/summary",
            Some(token("3", "inventory_admin")),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Insufficient permissions");

        let (status, body) = send(
            &app,
            "GET",
            "/admin/api/reports/summary",
            Some(token("2", "admin")),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["lowStock"], serde_json::json!(["SKU-002"]));
    }

    #[tokio::test]
    async fn test_only_superadmin_changes_roles() {
        let app = app();
        let update = serde_json::json!({ "role": "admin" });

        let (status, _) = send(
            &app,
            "PATCH",
            "/admin/api/users/3/role",
            Some(token("2", "admin")),
            Some(update.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &app,
            "PATCH",
            "/admin/api/users/3/role",
            Some(token("1", "superadmin")),
            Some(update),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["role"], "admin");
    }

    #[tokio::test]
    async fn test_delete_user() {
        let app = app();

        let (status, _) = send(
            &app,
            "DELETE",
            "/admin/api/users/2",
            Some(token("3", "inventory_admin")),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            "DELETE",
            "/admin/api/users/1",
            Some(token("1", "superadmin")),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "DELETE",
            "/admin/api/users/2",
            Some(token("1", "superadmin")),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            "GET",
            "/admin/api/users/2",
            Some(token("1", "superadmin")),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_adjust_stock() {
        let app = app();

        let (status, body) = send(
            &app,
            "POST",
            "/admin/api/inventory/SKU-001/adjust",
            Some(token("3", "inventory_admin")),
            Some(serde_json::json!({ "delta": -2 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["quantity"], 40);

        let (status, _) = send(
            &app,
            "POST",
            "/admin/api/inventory/SKU-002/adjust",
            Some(token("3", "inventory_admin")),
            Some(serde_json::json!({ "delta": -10 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = app();
        let (status, body) = send(&app, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }
}
