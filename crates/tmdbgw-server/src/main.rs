//! tmdbgw - HTTP gateway over the TMDB movie API.

/// Layered application configuration (TOML, env, CLI).
mod config;
/// JSON error envelope.
mod error;
/// Route handlers.
mod handlers;
/// Route table.
mod router;
/// Shared handler state.
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tmdbgw_api::enrich::Enricher;
use tmdbgw_api::tmdb::TmdbClient;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, require_api_key, resolve_config_path};
use crate::router::create_router;
use crate::state::AppState;

const APP_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (rev:",
    env!("GIT_HASH"),
    ")"
);

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version = APP_VERSION)]
struct Cli {
    /// Override config directory (reads `{dir}/config.toml`).
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Listen port (overrides `PORT` and the config file).
    #[arg(short, long)]
    port: Option<u16>,
}

/// Builds the final configuration from file, environment and flags.
///
/// # Errors
///
/// Returns an error if the config file is unreadable or `PORT` is invalid.
#[instrument(skip_all)]
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let env = |key: &str| std::env::var(key).ok();
    let config_path = resolve_config_path(cli.dir.as_deref(), env)?;
    let mut config = AppConfig::load(&config_path)?;
    config.apply_env(env)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    tracing::debug!(path = %config_path.display(), ?config, "Loaded configuration");
    Ok(config)
}

/// Builds a `TmdbClient` for the configured base URL.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the client fails to build.
fn build_tmdb_client(config: &AppConfig, api_token: String) -> Result<TmdbClient> {
    let base_url = Url::parse(&config.tmdb.base_url)
        .with_context(|| format!("invalid TMDB base URL {:?}", config.tmdb.base_url))?;

    TmdbClient::builder()
        .base_url(base_url)
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

fn announce_listening(addr: SocketAddr) {
    tracing::info!("Listening on {addr}");
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        return;
    }
    tracing::info!("Shutting down");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let api_token = require_api_key(|key| std::env::var(key).ok())?;
    let tmdb = build_tmdb_client(&config, api_token)?;
    let state = AppState::new(tmdb, Enricher::new(config.tmdb.image_base_url.clone()));

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "failed to bind {}:{}",
                config.server.host, config.server.port
            )
        })?;
    announce_listening(listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}
