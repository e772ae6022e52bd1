//! `clash-proxy run`: start the proxy server.
//!
//! Builds the upstream configuration from the CLI, starts the Axum HTTP
//! server, and shuts down gracefully on SIGTERM / Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::cli::RunArgs;
use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::logging;
use crate::server::{self, AppState};
use crate::upstream::client::ClashClient;

pub async fn execute(args: RunArgs) -> Result<(), ProxyError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    #[cfg(feature = "sentry-integration")]
    let _sentry_guard = args
        .sentry_dsn
        .as_ref()
        .map(|dsn| crate::sentry_integration::init(dsn, args.sentry_environment.as_deref()));

    let upstream_config = UpstreamConfig::new(&args.upstream_url, args.api_key.clone())?;
    if !upstream_config.has_api_key() {
        tracing::warn!("CLASH_API_KEY is not set, upstream calls will be unauthenticated");
    }
    let upstream_url = upstream_config.base_url.clone();

    let client = ClashClient::new(upstream_config, server::build_http_client());
    let state = Arc::new(AppState::new(Arc::new(client)));
    let router = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        upstream = %upstream_url,
        "clash-proxy started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("clash-proxy stopped");
    Ok(())
}
