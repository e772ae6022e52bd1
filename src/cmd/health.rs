//! `clash-proxy health`: check the health of a running instance.
//!
//! Queries `/health` through the same rustls-backed client the proxy uses
//! for upstream calls, so `https://` instances work too, then prints a
//! summary or the raw JSON.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};

use crate::cli::HealthArgs;
use crate::error::ProxyError;
use crate::health::HealthResponse;
use crate::server;

const CHECK_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn execute(args: HealthArgs) -> Result<(), ProxyError> {
    let body = fetch_health(&health_url(&args.url)).await?;

    if args.json {
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(());
    }

    match serde_json::from_slice::<HealthResponse>(&body) {
        Ok(health) => print!("{}", render_summary(&health, &args.url)),
        Err(e) => {
            eprintln!("Failed to parse health response: {e}");
            println!("{}", String::from_utf8_lossy(&body));
        }
    }

    Ok(())
}

fn health_url(instance: &str) -> String {
    format!("{}/health", instance.trim_end_matches('/'))
}

fn http_error<E>(e: E) -> ProxyError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ProxyError::HttpRequest { source: Box::new(e) }
}

/// GET the health document; any non-2xx status is an error.
async fn fetch_health(url: &str) -> Result<Bytes, ProxyError> {
    let uri: hyper::Uri = url.parse().map_err(|e: hyper::http::uri::InvalidUri| {
        ProxyError::UriParse { source: Box::new(e) }
    })?;
    let req = hyper::Request::get(uri)
        .body(Full::new(Bytes::new()))
        .map_err(http_error)?;

    let response = tokio::time::timeout(CHECK_TIMEOUT, server::build_http_client().request(req))
        .await
        .map_err(|_| ProxyError::HttpRequest {
            source: format!("health check timed out after {}s", CHECK_TIMEOUT.as_secs()).into(),
        })?
        .map_err(http_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProxyError::HealthCheckFailed(status));
    }

    Ok(response.into_body().collect().await.map_err(http_error)?.to_bytes())
}

fn render_summary(health: &HealthResponse, instance: &str) -> String {
    format!(
        "\u{2713} clash-proxy is healthy ({instance})\n  \
         version:   {}\n  \
         uptime:    {}\n  \
         upstream:  {}\n  \
         calls:     {} succeeded, {} failed\n",
        health.version,
        format_uptime(health.uptime_seconds),
        health.upstream,
        health.stats.upstream_succeeded,
        health.stats.upstream_failed,
    )
}

fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::StatsResponse;

    #[test]
    fn formats_uptime() {
        assert_eq!(format_uptime(42), "42s");
        assert_eq!(format_uptime(125), "2m 5s");
        assert_eq!(format_uptime(3_725), "1h 2m 5s");
    }

    #[test]
    fn builds_health_url() {
        assert_eq!(health_url("http://localhost:3000"), "http://localhost:3000/health");
        assert_eq!(health_url("https://proxy.example.com/"), "https://proxy.example.com/health");
    }

    #[test]
    fn summary_lists_upstream_and_counts() {
        let health = HealthResponse {
            status: "healthy".into(),
            version: "0.1.0".into(),
            uptime_seconds: 125,
            upstream: "https://api.clashroyale.com/v1".into(),
            stats: StatsResponse {
                upstream_succeeded: 7,
                upstream_failed: 2,
            },
        };
        let summary = render_summary(&health, "http://localhost:3000");
        assert!(summary.starts_with("\u{2713} clash-proxy is healthy (http://localhost:3000)"));
        assert!(summary.contains("uptime:    2m 5s"));
        assert!(summary.contains("upstream:  https://api.clashroyale.com/v1"));
        assert!(summary.contains("calls:     7 succeeded, 2 failed"));
    }

    #[tokio::test]
    async fn unreachable_instance_is_an_http_error() {
        let err = fetch_health("http://127.0.0.1:1/health").await.unwrap_err();
        assert!(matches!(err, ProxyError::HttpRequest { .. }));
    }
}
