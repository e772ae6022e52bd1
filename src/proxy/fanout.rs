//! Concurrent fetch of every resource type for one clan.
//!
//! One task per [`ResourceType`] is spawned onto a `JoinSet` and the set
//! is drained until every task has settled. A failed (or panicked) fetch
//! only drops its own key from the bundle; siblings are never cancelled.
//! If every fetch fails the bundle is empty and the caller still answers
//! 200.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::task::JoinSet;

use crate::error::UpstreamError;
use crate::server::Stats;
use crate::upstream::resource::ResourceType;
use crate::upstream::Upstream;

/// Resource name to payload, successful fetches only.
pub type Bundle = Map<String, Value>;

pub struct FanOutRequest<'a> {
    pub upstream: &'a Arc<dyn Upstream>,
    pub stats: &'a Stats,
    pub encoded_tag: &'a str,
    pub correlation_id: &'a str,
}

pub async fn fetch_all(req: FanOutRequest<'_>) -> Bundle {
    let mut join_set: JoinSet<(ResourceType, Result<Value, UpstreamError>)> = JoinSet::new();

    for resource in ResourceType::ALL {
        let upstream = Arc::clone(req.upstream);
        let path = resource.path(req.encoded_tag);
        join_set.spawn(async move {
            let result = upstream.fetch(&path).await;
            (resource, result)
        });
    }

    let mut bundle = Bundle::new();

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((resource, Ok(data))) => {
                req.stats.succeeded.fetch_add(1, Ordering::Relaxed);
                bundle.insert(resource.name().to_string(), data);
            }
            Ok((resource, Err(e))) => {
                req.stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    correlation_id = %req.correlation_id,
                    resource = %resource,
                    status = e.status.as_u16(),
                    error = %e.message,
                    "resource fetch failed, omitting from bundle"
                );
            }
            Err(join_err) => {
                req.stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    correlation_id = %req.correlation_id,
                    error = %join_err,
                    "resource fetch task panicked"
                );
            }
        }
    }

    tracing::info!(
        correlation_id = %req.correlation_id,
        fetched = bundle.len(),
        requested = ResourceType::ALL.len(),
        "bundle assembled"
    );

    bundle
}
