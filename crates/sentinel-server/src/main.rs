//! Sentinel fraud console HTTP server
//!
//! Serves the login, dashboard, audit and rules views as a JSON API.

use anyhow::Result;
use sentinel_server::api;
use sentinel_server::config::{LogFormat, ServerConfig};
use sentinel_server::console::init_console;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(&config)?;
    info!(
        host = %config.host,
        port = config.port,
        classifier = ?config.classifier,
        "Loaded configuration"
    );

    // Initialize console
    let console = Arc::new(init_console(&config).await?);
    info!("Console initialized");

    let app = api::create_router(console.clone());

    // Start server
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Login:        POST http://{}/login", addr);
    info!("  Dashboard:    http://{}/dashboard", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    console.shutdown().await;
    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(config: &ServerConfig) -> Result<()> {
    let level = &config.log_level;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "sentinel_server={level},sentinel_sdk={level},sentinel_runtime={level},sentinel_llm={level},tower_http=debug"
        )
        .into()
    });
    let json = config.log_format == LogFormat::Json;

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
