//! NWT Climate Explorer - Backend Server

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use nwt_climate_server::{create_app, services::DatasetLoader, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nwt_climate_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting NWT Climate Explorer Server");
    tracing::info!("Environment: {}", config.environment);

    // Load the dataset once; nothing is served without it
    tracing::info!("Loading climate data...");
    let dataset = DatasetLoader::load(&config.data).context("failed to load climate data")?;
    tracing::info!(
        "Dataset ready: {} rows, {} locations",
        dataset.rows().len(),
        dataset.locations().len()
    );

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server host {}", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);

    // Create application state
    let state = AppState {
        dataset: Arc::new(dataset),
        config: Arc::new(config),
    };

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
