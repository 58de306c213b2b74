//! # userbook API Server
//!
//! Serves user CRUD endpoints under `/users`, a health check, and the
//! generated OpenAPI document.
//!
//! ## Usage
//!
//! ```bash
//! API_PORT=8080 cargo run -p userbook-api
//! ```

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userbook_api::{
    app::{build_router, AppState},
    config::Config,
};
use userbook_shared::store::InMemoryUserStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userbook_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "userbook API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    let store = Arc::new(InMemoryUserStore::with_shards(config.store.shards));
    tracing::info!(shards = store.shard_count(), "User store ready");

    if config.docs.enabled {
        tracing::info!("API documentation served at {}", userbook_api::app::DOCS_PATH);
    }

    let app = build_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
