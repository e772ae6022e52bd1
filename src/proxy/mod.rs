//! Proxy route handlers.
//!
//! [`clan_handler`] serves `GET /api/clan/{tag}` and [`clash_handler`]
//! serves `GET /api/clash?tag=..&type=..`. Both translate the caller's
//! tag into an upstream resource path ([`tag`]), call the shared
//! [`Upstream`](crate::upstream::Upstream), and mirror the outcome.
//! `type=full` is delegated to [`fanout`].

pub mod fanout;
pub mod tag;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{ClientInputError, UpstreamError};
use crate::server::AppState;
use crate::upstream::resource::{ResourceType, Selector};

const CORRELATION_HEADER: &str = "x-correlation-id";

/// `/api/clash` parameters. A repeated key keeps every value, joined with
/// `,` in arrival order, so `tag=a&tag=b` reads as `a,b`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ClashQuery {
    pub tag: Option<String>,
    pub kind: Option<String>,
}

impl ClashQuery {
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "tag" => &mut query.tag,
                "type" => &mut query.kind,
                _ => continue,
            };
            if let Some(existing) = slot.as_mut() {
                existing.push(',');
                existing.push_str(&value);
            } else {
                *slot = Some(value);
            }
        }
        query
    }
}

pub async fn clan_handler(
    State(state): State<Arc<AppState>>,
    Path(raw_tag): Path<String>,
    req_headers: HeaderMap,
) -> Response {
    let correlation_id = correlation_id(&req_headers);
    let path = ResourceType::Info.path(&tag::escape_marker(&raw_tag));

    tracing::info!(
        correlation_id = %correlation_id,
        tag = %raw_tag,
        "clan request received"
    );

    let response = match fetch_one(&state, &path).await {
        Ok(data) => Json(data).into_response(),
        Err(e) => {
            tracing::error!(
                correlation_id = %correlation_id,
                status = e.status.as_u16(),
                error = %e.message,
                "error fetching clan"
            );
            e.into_response()
        }
    };

    with_correlation_id(response, &correlation_id)
}

pub async fn clash_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
    req_headers: HeaderMap,
) -> Response {
    let correlation_id = correlation_id(&req_headers);
    let query = ClashQuery::from_pairs(pairs);
    let response = match resolve_clash(&state, query, &correlation_id).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(correlation_id = %correlation_id, error = %e, "rejected clash request");
            e.into_response()
        }
    };
    with_correlation_id(response, &correlation_id)
}

async fn resolve_clash(
    state: &AppState,
    query: ClashQuery,
    correlation_id: &str,
) -> Result<Response, ClientInputError> {
    let raw_tag = query
        .tag
        .filter(|t| !t.is_empty())
        .ok_or(ClientInputError::MissingTag)?;
    let selector =
        Selector::parse(query.kind.as_deref()).map_err(|_| ClientInputError::InvalidType)?;
    let encoded_tag = tag::encode_full(&raw_tag);

    tracing::info!(
        correlation_id = %correlation_id,
        tag = %raw_tag,
        selector = ?selector,
        "clash request received"
    );

    let response = match selector {
        Selector::Full => {
            let bundle = fanout::fetch_all(fanout::FanOutRequest {
                upstream: &state.upstream,
                stats: &state.stats,
                encoded_tag: &encoded_tag,
                correlation_id,
            })
            .await;
            Json(bundle).into_response()
        }
        Selector::One(resource) => match fetch_one(state, &resource.path(&encoded_tag)).await {
            Ok(data) => Json(data).into_response(),
            Err(e) => {
                tracing::error!(
                    correlation_id = %correlation_id,
                    resource = %resource,
                    status = e.status.as_u16(),
                    error = %e.message,
                    "error in clash request"
                );
                e.into_response()
            }
        },
    };

    Ok(response)
}

async fn fetch_one(state: &AppState, path: &str) -> Result<serde_json::Value, UpstreamError> {
    let result = state.upstream.fetch(path).await;
    let counter = if result.is_ok() {
        &state.stats.succeeded
    } else {
        &state.stats.failed
    };
    counter.fetch_add(1, Ordering::Relaxed);
    result
}

fn correlation_id(headers: &HeaderMap) -> String {
    headers
        .get(CORRELATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), String::from)
}

fn with_correlation_id(mut response: Response, correlation_id: &str) -> Response {
    if let Ok(val) = HeaderValue::from_str(correlation_id) {
        response.headers_mut().insert(CORRELATION_HEADER, val);
    }
    response
}
