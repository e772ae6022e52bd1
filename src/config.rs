//! Runtime configuration for the upstream client.
//!
//! [`UpstreamConfig`] is built once at startup from the `run` arguments
//! and handed to [`ClashClient::new`](crate::upstream::client::ClashClient::new).
//! Nothing reads the credential from the environment after that point.

use url::Url;

use crate::error::ProxyError;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.clashroyale.com/v1";

#[derive(Clone)]
pub struct UpstreamConfig {
    /// Base URL without a trailing slash; resource paths are appended verbatim.
    pub base_url: String,
    pub api_key: Option<String>,
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl UpstreamConfig {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, ProxyError> {
        validate_base_url(base_url).map_err(|reason| ProxyError::InvalidUpstreamUrl {
            url: base_url.to_string(),
            reason,
        })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Validate the upstream base URL. Returns `Ok(())` or a human-readable error.
pub fn validate_base_url(url: &str) -> Result<(), String> {
    match Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            if scheme != "http" && scheme != "https" {
                Err(format!(
                    "unsupported scheme '{scheme}' (expected http or https)"
                ))
            } else if parsed.query().is_some() {
                Err("base URL must not carry a query string".into())
            } else {
                Ok(())
            }
        }
        Err(_) => Err(format!("'{url}' is not a valid URL")),
    }
}
