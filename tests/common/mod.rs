//! Shared fixtures: a fake Clash Royale API and a proxy wired to it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

use clash_proxy::config::UpstreamConfig;
use clash_proxy::server::{self, AppState};
use clash_proxy::upstream::client::ClashClient;

pub const API_KEY: &str = "test-api-key";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub authorization: Option<String>,
}

/// Answers `{"path": <request path>}` unless the last path segment has a
/// canned failure registered.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<RecordedCall>>,
    failures: HashMap<String, (StatusCode, Value)>,
}

impl FakeApi {
    pub fn failing(mut self, last_segment: &str, status: StatusCode, body: Value) -> Self {
        self.failures
            .insert(last_segment.to_string(), (status, body));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.calls().into_iter().map(|c| c.path).collect();
        paths.sort();
        paths
    }
}

async fn fake_handler(State(api): State<Arc<FakeApi>>, uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path().to_string();
    {
        let mut calls = api.calls.lock().unwrap();
        calls.push(RecordedCall {
            path: path.clone(),
            authorization: headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(String::from),
        });
    }

    let last_segment = path.rsplit('/').next().unwrap_or_default();
    if let Some((status, body)) = api.failures.get(last_segment) {
        return (*status, Json(body.clone())).into_response();
    }
    Json(json!({ "path": path })).into_response()
}

pub struct Harness {
    pub proxy: SocketAddr,
    pub api: Arc<FakeApi>,
    shutdown: Vec<tokio::sync::oneshot::Sender<()>>,
}

impl Harness {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{path_and_query}", self.proxy)
    }

    pub fn shutdown(self) {
        for tx in self.shutdown {
            let _ = tx.send(());
        }
    }
}

async fn serve(router: Router) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

/// Start the proxy against an arbitrary upstream base URL.
pub async fn start_proxy(base_url: &str, api_key: Option<&str>) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let config = UpstreamConfig::new(base_url, api_key.map(String::from)).unwrap();
    let client = ClashClient::new(config, server::build_http_client());
    let state = Arc::new(AppState::new(Arc::new(client)));
    serve(server::build_router(state)).await
}

/// Start a fake upstream and a proxy pointed at it.
pub async fn start(api: FakeApi) -> Harness {
    let api = Arc::new(api);
    let fake = Router::new()
        .fallback(fake_handler)
        .with_state(Arc::clone(&api));
    let (upstream_addr, upstream_tx) = serve(fake).await;

    let (proxy, proxy_tx) = start_proxy(&format!("http://{upstream_addr}/v1"), Some(API_KEY)).await;

    Harness {
        proxy,
        api,
        shutdown: vec![proxy_tx, upstream_tx],
    }
}
