//! Access to the Clash Royale API.
//!
//! The handlers only see the [`Upstream`] trait; [`client::ClashClient`]
//! is the production implementation and [`resource`] holds the catalogue
//! of per-clan resource paths.

pub mod client;
pub mod headers;
pub mod resource;

use async_trait::async_trait;

use crate::error::UpstreamError;

// async_trait is required here because Upstream is shared as Arc<dyn Upstream>
// and native async fn in traits does not support dyn dispatch.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Base URL requests are sent to, for diagnostics.
    fn base_url(&self) -> &str;

    /// GET a fully formed resource path (tag already encoded) and parse the JSON body.
    async fn fetch(&self, resource_path: &str) -> Result<serde_json::Value, UpstreamError>;
}
