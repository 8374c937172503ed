//! NodePing exporter
//!
//! Republishes the status and latency of NodePing checks as Prometheus metrics.

mod collector;
mod config;
mod nodeping;
mod web;

use collector::Exporter;
use config::ServerConfig;
use nodeping::NodePingClient;
use web::Server;

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("nodeping_exporter=info".parse()?))
        .init();

    let cfg = ServerConfig::load()?;
    tracing::info!("Using NodePing API at {}", cfg.api_url);

    // Refuse to serve with a token the API does not accept
    let client = NodePingClient::connect(&cfg.api_url, &cfg.token, cfg.request_timeout).await?;
    tracing::info!("NodePing API access verified");

    let exporter = Arc::new(Exporter::new(client)?);
    tracing::info!(
        "Exposing {} metric families",
        exporter.describe().len()
    );

    tracing::info!("Starting nodeping-exporter on port {}...", cfg.http_port);
    let server = Server::new(cfg, exporter);
    server.start(web::shutdown_signal()).await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
