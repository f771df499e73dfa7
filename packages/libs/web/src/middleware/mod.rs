//! 공통 미들웨어
//!
//! 요청 ID, principal 해석, 인가 게이트 미들웨어를 정의합니다.

mod auth;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

pub use auth::{guard, guarded, resolve_principal, GuardedOperation, SharedResolver};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// 요청 ID (gateway가 붙인 값을 backend까지 이어서 씀)
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

tokio::task_local! {
    static REQUEST_ID: String;
}

pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|id| id.clone()).ok()
}

/// 들어온 `x-request-id`가 쓸 만하면 그대로, 아니면 새로 발급
fn incoming_request_id(req: &Request) -> Option<String> {
    let value = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    let valid = !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|b| b.is_ascii_graphic());
    valid.then(|| value.to_string())
}

pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = incoming_request_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
    if let Ok(value) = HeaderValue::from_str(&id) {
        req.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
        req.extensions_mut().insert(RequestId(id.clone()));
        let mut resp = REQUEST_ID.scope(id, next.run(req)).await;
        resp.headers_mut().insert(REQUEST_ID_HEADER, value);
        return resp;
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use axum::middleware::from_fn;
    use axum::routing::get;
    use axum::{Extension, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/",
                get(|Extension(RequestId(id)): Extension<RequestId>| async move { id }),
            )
            .layer(from_fn(request_id))
    }

    async fn send(header: Option<&str>) -> (String, String) {
        let mut builder = HttpRequest::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(REQUEST_ID_HEADER, value);
        }
        let resp = app().oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let echoed = resp.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (echoed, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_incoming_request_id_kept() {
        let (echoed, seen) = send(Some("gw-7f3a")).await;
        assert_eq!(echoed, "gw-7f3a");
        assert_eq!(seen, "gw-7f3a");
    }

    #[tokio::test]
    async fn test_request_id_generated() {
        let (echoed, seen) = send(None).await;
        assert!(Uuid::parse_str(&echoed).is_ok());
        assert_eq!(echoed, seen);

        let long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        let (echoed, _) = send(Some(&long)).await;
        assert_ne!(echoed, long);
        assert!(Uuid::parse_str(&echoed).is_ok());
    }
}
