//! Unified error types for clash-proxy.
//!
//! Defines [`ProxyError`] (process-level failures surfaced by the CLI),
//! [`UpstreamError`] (a failed call to the Clash Royale API) and
//! [`ClientInputError`] (bad caller input on `/api/clash`). The two
//! request-level errors implement [`IntoResponse`] so handlers can
//! return them directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Message used when upstream gives no usable `message` of its own.
pub const FALLBACK_MESSAGE: &str = "Internal Server Error";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProxyError {
    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid upstream URL '{url}': {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}

/// A settled-failure outcome of one upstream call.
///
/// `status` mirrors the upstream status when there was one and is 500
/// otherwise; `message` mirrors the upstream `message` field or falls
/// back to [`FALLBACK_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("upstream responded {status}: {message}")]
pub struct UpstreamError {
    pub status: StatusCode,
    pub message: String,
}

impl UpstreamError {
    /// Build from a non-success upstream response.
    ///
    /// Only a non-empty string `message` is passed through; any other JSON
    /// type falls back, so the envelope's `message` is always a string.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        Self { status, message }
    }

    /// A call that never produced an upstream status (connect, TLS, body read).
    #[must_use]
    pub fn transport() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        let body = json!({ "error": true, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

/// Input rejected before any upstream call is made. Always a 400.
///
/// The body is `{"error": "<text>"}` with no `message` field, unlike the
/// upstream envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClientInputError {
    #[error("Missing tag")]
    MissingTag,

    #[error("Invalid type")]
    InvalidType,
}

impl IntoResponse for ClientInputError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.to_string() });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
