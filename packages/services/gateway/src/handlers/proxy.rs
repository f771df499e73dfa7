//! Reverse proxy 핸들러
//!
//! `<prefix>/api/...` 요청을 해당 백엔드로 그대로 전달합니다. 경로, 쿼리,
//! 메서드, 본문은 바꾸지 않고 연결 단위 헤더만 제거합니다.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderName, Method, StatusCode, Uri};
use axum::response::Response;

use dg_web::{ApiError, Result};

use crate::state::AppState;

/// 전달하지 않는 연결 단위 헤더
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// 연결 단위 헤더 제거
///
/// 고정 목록 외에 `Connection` 값에 나열된 헤더도 함께 제거합니다.
fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in HOP_BY_HOP.iter().chain(&listed) {
        headers.remove(name);
    }
    // 본문 길이는 다시 계산됨
    headers.remove(header::CONTENT_LENGTH);
}

/// fallback 핸들러: 라우팅 대상이면 전달, 아니면 404
pub async fn proxy(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    mut headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Response> {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let Some(matched) = state.routes.resolve(path_and_query) else {
        tracing::debug!(path = %path_and_query, "no route matched");
        return Err(ApiError::not_found("Not found"));
    };
    let prefix = matched.rule.prefix.clone();
    let target = matched.target_url().inspect_err(|e| {
        tracing::warn!(%prefix, code = e.code(), "refusing to forward: {}", e);
    })?;

    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            tracing::debug!(%prefix, limit = state.config.max_body_bytes, "request body too large");
            ApiError::PayloadTooLarge {
                message: "Request body too large".to_string(),
            }
        } else {
            ApiError::bad_request(format!("Failed to read request body: {}", rejection))
        }
    })?;

    strip_hop_by_hop(&mut headers);
    headers.remove(header::HOST);

    tracing::debug!(%method, %prefix, %target, "forwarding request");

    let upstream = state
        .client
        .request(method, target.clone())
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(%prefix, %target, "upstream request failed: {}", e);
            ApiError::BadGateway {
                message: format!("Upstream service for {} is unavailable", prefix),
            }
        })?;

    let status = upstream.status();
    let mut response_headers = upstream.headers().clone();
    strip_hop_by_hop(&mut response_headers);

    let bytes = upstream.bytes().await.map_err(|e| {
        tracing::warn!(%prefix, %target, "failed to read upstream response: {}", e);
        ApiError::BadGateway {
            message: format!("Upstream service for {} returned an invalid response", prefix),
        }
    })?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}
