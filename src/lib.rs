//! clash-proxy is a credential-injecting HTTP proxy for the Clash Royale API.
//!
//! Callers hit two routes and never see the upstream bearer token:
//!
//! - `GET /api/clan/{tag}` returns one clan's profile.
//! - `GET /api/clash?tag=..&type=..` returns one resource (`info`,
//!   `members`, `war`, `warlog`, `riverrace`, `riverracelog`) or, with
//!   `type=full`, a bundle of all of them fetched concurrently.
//!
//! Upstream statuses are mirrored; failures are wrapped in
//! `{"error": true, "message": ..}`.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, health).
//! - [`config`] -- The explicit upstream configuration (base URL, API key).
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler returning runtime diagnostics.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`proxy`] -- The two route handlers, tag encoding, and the bundle fan-out.
//! - [`server`] -- Axum router, shared application state, HTTP client, and
//!   graceful shutdown.
//! - [`upstream`] -- The [`Upstream`](upstream::Upstream) seam, its hyper-backed
//!   client, and the resource catalogue.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `sentry-integration` | Sentry error tracking |

// Binary crate: public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod proxy;
pub mod server;
pub mod upstream;

#[cfg(feature = "sentry-integration")]
pub mod sentry_integration;
