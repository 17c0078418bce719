//! Notes Server Library
//!
//! Multi-tenant notes backed by SQLite, guarded by HS256 bearer tokens.

pub mod core;

use anyhow::Context;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::core::config::{AppState, ServerConfig};
use crate::core::store::SqliteStore;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "notes_server=debug,tower_http=info,info".into());

    // Already set (e.g. by an embedding binary), ignore
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    info!("=== Notes Server ===");

    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    info!("Configuration: {:?}", config);

    let store = Arc::new(
        SqliteStore::connect(&config.database_url)
            .await
            .context("Failed to open database")?,
    );
    info!("Credential store initialized");

    let app_state = AppState::new(&config, store.clone());
    let app = crate::core::router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
