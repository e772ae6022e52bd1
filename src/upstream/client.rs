//! Production [`Upstream`] implementation over the pooled hyper client.
//!
//! One GET per call, no retries and no timeout override. Non-success
//! statuses and transport failures are both turned into an
//! [`UpstreamError`] and handed back to the caller.

use std::time::Instant;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, StatusCode};

use super::headers::build_upstream_headers;
use super::Upstream;
use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use crate::server::HttpClient;

#[derive(Clone)]
pub struct ClashClient {
    config: UpstreamConfig,
    http_client: HttpClient,
}

impl ClashClient {
    #[must_use]
    pub fn new(config: UpstreamConfig, http_client: HttpClient) -> Self {
        Self {
            config,
            http_client,
        }
    }

    async fn send(&self, url: &str) -> Result<(StatusCode, Bytes), UpstreamError> {
        let mut req_builder = hyper::Request::builder().method(Method::GET).uri(url);
        for (key, value) in &build_upstream_headers(&self.config) {
            req_builder = req_builder.header(key, value);
        }

        let req = req_builder.body(Full::new(Bytes::new())).map_err(|e| {
            tracing::warn!(url = %url, error = %e, "failed to build upstream request");
            UpstreamError::transport()
        })?;

        let response = self.http_client.request(req).await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "upstream request failed");
            UpstreamError::transport()
        })?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, status = status.as_u16(), error = %e, "upstream body read error");
                UpstreamError::transport()
            })?
            .to_bytes();

        Ok((status, body))
    }
}

#[async_trait]
impl Upstream for ClashClient {
    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    #[allow(clippy::cast_possible_truncation)]
    async fn fetch(&self, resource_path: &str) -> Result<serde_json::Value, UpstreamError> {
        let url = upstream_url(&self.config.base_url, resource_path)?;
        let start = Instant::now();

        let (status, body) = self.send(&url).await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let err = UpstreamError::from_response(status, &body);
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                message = %err.message,
                latency_ms,
                "upstream returned an error"
            );
            return Err(err);
        }

        tracing::debug!(url = %url, status = status.as_u16(), latency_ms, "upstream responded");
        Ok(parse_body(&body))
    }
}

/// Join base URL and resource path the way a WHATWG URL parser does.
///
/// Bytes that cannot appear raw in a path (spaces, non-ASCII, controls)
/// are percent-encoded; reserved characters and existing escapes such as
/// `%23` are left alone. Any fragment is dropped before sending.
fn upstream_url(base_url: &str, resource_path: &str) -> Result<String, UpstreamError> {
    let raw = format!("{base_url}{resource_path}");
    let mut url = url::Url::parse(&raw).map_err(|e| {
        tracing::warn!(url = %raw, error = %e, "invalid upstream URL");
        UpstreamError::transport()
    })?;
    url.set_fragment(None);
    Ok(url.into())
}

/// JSON bodies are parsed; anything else is passed on as a JSON string.
fn parse_body(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(body).into_owned()))
}
