//! Outbound request headers for upstream calls.
//!
//! Caller headers are never forwarded. Every upstream request carries the
//! same fixed set, with the bearer credential injected server-side.

use axum::http::{header, HeaderMap, HeaderValue};

use crate::config::UpstreamConfig;

const USER_AGENT: &str = concat!("clash-proxy/", env!("CARGO_PKG_VERSION"));

/// Build the header set for one upstream call.
///
/// Without a configured key no `Authorization` header is sent and the
/// upstream rejects the call itself.
pub fn build_upstream_headers(config: &UpstreamConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

    if let Some(key) = &config.api_key {
        match HeaderValue::from_str(&format!("Bearer {key}")) {
            Ok(mut val) => {
                val.set_sensitive(true);
                headers.insert(header::AUTHORIZATION, val);
            }
            Err(_) => {
                tracing::warn!("API key contains characters not allowed in a header, sending unauthenticated");
            }
        }
    }

    headers
}
