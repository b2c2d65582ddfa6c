//! DiceCheck web server
//!
//! Serves the JSON API used by the browser front end:
//! - `POST /api/roll` rolls dice once and evaluates conditions
//! - `POST /api/simulate` compares two scenarios by Monte Carlo simulation

mod config;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dicecheck_web=info,dc_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Default simulations: {}", config.default_simulations);
    tracing::info!("  Max simulations: {}", config.max_simulations);
    tracing::info!("  Max dice: {}, max sides: {}", config.max_dice, config.max_sides);
    if let Some(dir) = &config.static_dir {
        tracing::info!("  Static files: {}", dir.display());
    }

    let addr = SocketAddr::new(config.host, config.port);
    let state = Arc::new(AppState::new(config));
    let app = routes::create_router(Arc::clone(&state));

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(state: Arc<AppState>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
    // Running simulations stop early so in-flight requests can finish
    state.begin_shutdown();
}
