//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, health), and their associated argument structs.
//! Every `run` flag has an environment variable equivalent for container
//! deployments; a `.env` file in the working directory is loaded first.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_UPSTREAM_URL;

#[derive(Parser)]
#[command(
    name = "clash-proxy",
    version,
    about = "Credential-injecting HTTP proxy for the Clash Royale API",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        CLASH_API_KEY=... clash-proxy run    Start on port 3000\n  \
        clash-proxy health                   Check a running instance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the proxy server
    Run(Box<RunArgs>),

    /// Check health of a running instance
    Health(HealthArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        clash-proxy run                              Read CLASH_API_KEY from env or .env\n  \
        clash-proxy run -p 8080 --pretty             Local dev mode\n  \
        clash-proxy run --upstream-url http://localhost:9000/v1")]
pub struct RunArgs {
    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // -- Upstream --
    /// Bearer token for the Clash Royale API
    #[arg(
        long,
        env = "CLASH_API_KEY",
        hide_env_values = true,
        help_heading = "Upstream"
    )]
    pub api_key: Option<String>,

    /// Base URL of the Clash Royale API
    #[arg(
        long,
        env = "CLASH_API_URL",
        default_value = DEFAULT_UPSTREAM_URL,
        help_heading = "Upstream"
    )]
    pub upstream_url: String,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Observability --
    /// Sentry DSN (enables error tracking)
    #[cfg(feature = "sentry-integration")]
    #[arg(long, env = "SENTRY_DSN", help_heading = "Observability")]
    pub sentry_dsn: Option<String>,

    /// Sentry environment tag
    #[cfg(feature = "sentry-integration")]
    #[arg(long, env = "SENTRY_ENVIRONMENT", help_heading = "Observability")]
    pub sentry_environment: Option<String>,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:3000")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}
