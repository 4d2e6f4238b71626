//! # Storefront API Server
//!
//! REST backend for user registration/login, password change, payment-method
//! storage, and the background-image setting.
//!
//! ## Architecture
//!
//! The server is built with Axum over a PostgreSQL pool:
//! - credential endpoints (register, login, change-password)
//! - the transactional payment submission
//! - admin listing and soft deletion of stored cards
//! - the singleton background-image setting
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p storefront-api
//! ```

use storefront_api::app::{build_router, AppState};
use storefront_api::config::Config;
use storefront_shared::db::migrations::run_migrations;
use storefront_shared::db::pool::{create_pool, DatabaseConfig as PoolConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Storefront API server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Resolves when ctrl-c is received
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
