//! Quake Bot Server - Main Entry Point

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use quake_bot::{api, config, line, quake, state};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quake_bot=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Quake Bot Server"
    );

    if !config.has_recipient() {
        warn!("TARGET_USER_ID not set. Send \"id\" to the bot to discover it; alerts are disabled until then.");
    }

    // One HTTP client for both upstreams, bounded by the outbound timeout
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let source = Arc::new(quake::UsgsClient::new(http.clone(), &config));
    let messenger = Arc::new(line::LineClient::new(http, &config));
    let store = Arc::new(state::FileStore::new(&config.state_file));
    info!(state_file = %config.state_file, "Using file state store");

    // Build application state
    let state = api::AppState::new(config.clone(), source, store, messenger);

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
