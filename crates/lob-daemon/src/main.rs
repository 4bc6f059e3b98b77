//! lob-daemon entry point.
//!
//! This file is intentionally thin: it sets up tracing, loads layered config,
//! builds the shared state, wires middleware, and starts the HTTP server.
//! All route handlers live in `routes.rs`; all shared state types live in
//! `state.rs`.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use lob_config::{ConfigMode, LoadedConfig, UnusedKeyPolicy};
use lob_daemon::{routes, state};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env.local if present (dev convenience).
    // Silent if the file does not exist; production injects env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let loaded = load_config()?;
    let report = lob_config::report_unused_keys(
        ConfigMode::Daemon,
        &loaded.config_json,
        UnusedKeyPolicy::Warn,
    )?;
    if !report.is_clean() {
        warn!(unused = ?report.unused_leaf_pointers, "config contains keys nothing reads");
    }
    info!(config_hash = %loaded.config_hash, "config loaded");

    let shared = Arc::new(state::AppState::from_config(&loaded)?);

    let app = routes::build_router(Arc::clone(&shared))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_localhost_only());

    let addr = bind_addr_from_env()
        .or_else(|| bind_addr_from_config(&loaded))
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 5000)));
    info!("lob-daemon listening on http://{}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server crashed")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

/// `LOB_CONFIG` holds comma-separated YAML layers, base first.
fn load_config() -> anyhow::Result<LoadedConfig> {
    let Ok(raw) = std::env::var("LOB_CONFIG") else {
        return LoadedConfig::empty();
    };
    let paths: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    lob_config::load_layered_yaml(&paths).context("failed to load LOB_CONFIG layers")
}

fn bind_addr_from_env() -> Option<SocketAddr> {
    std::env::var("LOB_DAEMON_ADDR").ok()?.parse().ok()
}

fn bind_addr_from_config(loaded: &LoadedConfig) -> Option<SocketAddr> {
    loaded
        .config_json
        .pointer("/daemon/addr")?
        .as_str()?
        .parse()
        .ok()
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}

/// CORS: allow only localhost origins.
fn cors_localhost_only() -> CorsLayer {
    let allowed_origins = [
        "http://localhost",
        "http://127.0.0.1",
        "http://localhost:3000",
        "http://127.0.0.1:3000",
        "http://localhost:5173",
        "http://127.0.0.1:5173",
    ];

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(tower_http::cors::Any)
}
