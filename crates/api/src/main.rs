//! Stratum API server binary entrypoint.

use std::net::SocketAddr;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use stratum_common::config::StratumConfig;

use stratum_api::routes::create_router;
use stratum_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("stratum_api=debug,stratum_engine=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting Stratum API server...");

    // Load configuration
    let config = StratumConfig::from_env()?;
    tracing::info!(
        chain_id = config.chain_id,
        vault = %config.contracts.stratum_vault,
        reference_price = %config.reference_price,
        "Configuration loaded"
    );

    let port = config.api_port;
    let state = AppState::new(config);

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await?;

    Ok(())
}
