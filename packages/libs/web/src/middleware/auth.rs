//! Principal 해석 및 인가 게이트 미들웨어
//!
//! 1. `resolve_principal`: 헤더의 토큰을 principal로 바꿔 request extension에 붙임
//! 2. `guard`: extension의 principal로 게이트를 실행하고, 통과하지 못하면
//!    핸들러에 도달하기 전에 401/403을 응답

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::{from_fn_with_state, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::MethodRouter;

use dg_core::auth::{Principal, PrincipalResolver, TokenKind};
use dg_core::gate::Gate;
use dg_core::policy::RolePolicy;
use dg_core::roles::{AdminRole, Role};

use super::RequestId;
use crate::error::ApiError;

/// 서비스 전체에서 공유하는 resolver
pub type SharedResolver<R> = Arc<dyn PrincipalResolver<R>>;

/// 게이트와 operation 이름 (로그용)
#[derive(Debug, Clone)]
pub struct GuardedOperation<R: Role> {
    pub operation: Arc<str>,
    pub gate: Gate<R>,
}

impl<R: Role> GuardedOperation<R> {
    pub fn new(operation: &str, gate: Gate<R>) -> Self {
        Self {
            operation: Arc::from(operation),
            gate,
        }
    }

    /// 정책에서 operation 게이트를 찾아 생성. 선언되지 않은 operation은 설정 에러.
    pub fn from_policy(policy: &RolePolicy<R>, operation: &str) -> dg_core::Result<Self> {
        Ok(Self::new(operation, policy.gate(operation)?))
    }
}

impl GuardedOperation<AdminRole> {
    /// `/admin/api` 전체에 거는 일괄 admin 접근 게이트
    pub fn admin_access() -> Self {
        Self::new("admin.access", Gate::require_admin_access())
    }
}

/// 토큰을 principal로 해석해 extension에 붙인다
///
/// 해석에 실패한 토큰은 미인증으로 취급합니다. 이 미들웨어는 요청을 거부하지
/// 않으며, 거부는 `guard`가 담당합니다.
pub async fn resolve_principal<R: Role>(
    State(resolver): State<SharedResolver<R>>,
    mut req: Request,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let cookie_header = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok());
    let token = TokenKind::from_headers(auth_header, cookie_header);

    let principal = match resolver.resolve(token.as_ref()) {
        Ok(principal) => principal,
        Err(e) => {
            tracing::debug!(code = e.code(), "principal resolution failed: {}", e);
            Principal::Unauthenticated
        }
    };

    req.extensions_mut().insert(principal);
    next.run(req).await
}

/// 인가 게이트 미들웨어
pub async fn guard<R: Role>(
    State(guarded): State<GuardedOperation<R>>,
    req: Request,
    next: Next,
) -> Response {
    let principal = req.extensions().get::<Principal<R>>();

    match guarded.gate.enforce(principal) {
        Ok(()) => next.run(req).await,
        Err(e @ dg_core::Error::Forbidden { .. }) => {
            let (id, role) = principal
                .map(|p| {
                    (
                        p.id().map(|id| id.to_string()),
                        p.role().map(|role| role.as_str()),
                    )
                })
                .unwrap_or_default();
            let request_id = req.extensions().get::<RequestId>().map(|id| id.0.as_str());
            tracing::warn!(
                request_id = request_id.unwrap_or("-"),
                operation = %guarded.operation,
                principal = id.as_deref().unwrap_or("-"),
                role = role.unwrap_or("-"),
                allowed = %guarded.gate.allowed(),
                "permission denied"
            );
            ApiError::Core(e).into_response()
        }
        Err(e) => {
            tracing::debug!(
                operation = %guarded.operation,
                path = %req.uri().path(),
                code = e.code(),
                "rejected unauthenticated request"
            );
            ApiError::Core(e).into_response()
        }
    }
}

/// 라우트에 operation 게이트를 건다
pub fn guarded<R, S>(
    policy: &RolePolicy<R>,
    operation: &str,
    route: MethodRouter<S>,
) -> dg_core::Result<MethodRouter<S>>
where
    R: Role,
    S: Clone + Send + Sync + 'static,
{
    let state = GuardedOperation::from_policy(policy, operation)?;
    Ok(route.route_layer(from_fn_with_state(state, guard::<R>)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::{delete, get};
    use axum::Router;
    use dg_core::auth::{encode_dev_token, DevTokenResolver, PrincipalClaims};
    use dg_core::policy::AllowSet;
    use dg_core::roles::InventoryRole;
    use serde_json::Value;
    use tower::ServiceExt;

    fn policy() -> RolePolicy<InventoryRole> {
        RolePolicy::builder()
            .allow(
                "items.list",
                AllowSet::from_roles([InventoryRole::Admin, InventoryRole::Viewer]),
            )
            .allow("items.delete", AllowSet::from_roles([InventoryRole::Admin]))
            .build()
            .unwrap()
    }

    fn app() -> Router {
        let policy = policy();
        let resolver: SharedResolver<InventoryRole> = Arc::new(DevTokenResolver);
        Router::new()
            .route(
                "/items",
                guarded(&policy, "items.list", get(|| async { "listed" })).unwrap(),
            )
            .route(
                "/items/{id}",
                guarded(&policy, "items.delete", delete(|| async { "deleted" })).unwrap(),
            )
            .route("/public", get(|| async { "public" }))
            .layer(from_fn_with_state(resolver, resolve_principal::<InventoryRole>))
    }

    fn bearer(role: Option<&str>) -> String {
        let claims = PrincipalClaims::new("user_1", role.map(str::to_string));
        format!("Bearer {}", encode_dev_token(&claims).unwrap())
    }

    async fn send(app: Router, method: &str, uri: &str, auth: Option<String>) -> (StatusCode, String) {
        let mut builder = HttpRequest::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }
        let resp = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let (status, body) = send(app(), "GET", "/items", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Authentication required");
    }

    #[tokio::test]
    async fn test_invalid_token_is_401() {
        let (status, _) = send(app(), "GET", "/items", Some("Bearer garbage".to_string())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_viewer_allowed_to_list() {
        let (status, body) = send(app(), "GET", "/items", Some(bearer(Some("viewer")))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "listed");
    }

    #[tokio::test]
    async fn test_viewer_forbidden_to_delete() {
        let (status, body) = send(app(), "DELETE", "/items/1", Some(bearer(Some("viewer")))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Insufficient permissions");
    }

    #[tokio::test]
    async fn test_forbidden_carries_request_id() {
        let app = app().layer(axum::middleware::from_fn(crate::middleware::request_id));
        let req = HttpRequest::builder()
            .method("DELETE")
            .uri("/items/1")
            .header("authorization", bearer(Some("viewer")))
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(resp.headers()["x-request-id"], "req-42");
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Insufficient permissions");
        assert_eq!(body["requestId"], "req-42");
    }

    #[tokio::test]
    async fn test_cross_application_role_forbidden() {
        let (status, _) = send(app(), "GET", "/items", Some(bearer(Some("superadmin")))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(app(), "GET", "/items", Some(bearer(None))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_ungated_route_ignores_bad_token() {
        let (status, body) =
            send(app(), "GET", "/public", Some("Bearer garbage".to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "public");
    }

    #[tokio::test]
    async fn test_missing_extension_is_unauthenticated() {
        // resolver 미들웨어 없이 게이트만 있는 경우
        let app = Router::new().route(
            "/items",
            guarded(&policy(), "items.list", get(|| async { "listed" })).unwrap(),
        );
        let (status, _) = send(app, "GET", "/items", Some(bearer(Some("admin")))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_guarded_undeclared_operation() {
        let result = guarded::<InventoryRole, ()>(&policy(), "items.purge", get(|| async { "" }));
        assert!(matches!(
            result,
            Err(dg_core::Error::UndeclaredOperation { .. })
        ));
    }
}
