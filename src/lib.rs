use std::sync::Arc;

mod app;
mod application;
mod domain;
mod infrastructure;
mod presentation;

use app::{AppState, spawn_initial_load};
use infrastructure::config::{AppConfig, ConfigSource};
use infrastructure::logging::logger;
use presentation::commands::registry::router;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (config, source) = AppConfig::load().await?;

    if let Err(error) = logger::init_logger(&config.log_dir) {
        eprintln!("Failed to initialize logger: {}", error);
    }

    tracing::info!("Starting Sports Catalog");
    match &source {
        ConfigSource::File(path) => tracing::info!("Loaded configuration from {:?}", path),
        ConfigSource::Defaults(path) => {
            tracing::info!("No configuration at {:?}, using defaults", path)
        }
    }

    let state = Arc::new(AppState::new(config).await?);
    spawn_initial_load(state.clone());

    let address = state.config.bind_address.clone();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Listening on http://{}", address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Sports Catalog stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", error);
    }
    tracing::info!("Shutting down");
}
