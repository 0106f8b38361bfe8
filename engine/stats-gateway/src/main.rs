//! Stats Gateway service entry point

use anyhow::{Context, Result};
use percentile_engine::PercentileScorer;
use stats_gateway::{
    initialize_logging_with_config, rest_api, GatewayConfig, PercentileService, PgPlayerStatsStore,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let config = GatewayConfig::load().context("Failed to load configuration")?;

    // Initialize logging
    initialize_logging_with_config(&config.logging)?;

    info!("Starting Stats Gateway v{}", stats_gateway::VERSION);
    info!("Primary metric: {}", config.scorer.primary_metric);

    let scorer = PercentileScorer::from_config(&config.scorer).context("Invalid scorer configuration")?;

    let store = PgPlayerStatsStore::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    let service = PercentileService::new(Arc::new(store), scorer);
    let routes = rest_api::create_routes(service);

    let addr = config.server_addr()?;
    let (addr, server) = warp::serve(routes)
        .try_bind_with_graceful_shutdown(addr, async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Listening on http://{}", addr);
    server.await;

    info!("Stats Gateway stopped");
    Ok(())
}
