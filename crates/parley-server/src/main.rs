//! # parley-server
//!
//! HTTP front for the Parley chat core.
//!
//! This binary provides:
//! - **`POST /aggregate`**, the chat-list transform as a pure JSON service
//! - **Chat list and thread endpoints** backed by an in-process message store
//! - **`POST /messages`** for the compose box
//! - **Health and instance info** for load balancers and monitoring

mod api;
mod config;
mod error;
mod seed;

use std::sync::Arc;

use parley_store::MemoryStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,parley_server=debug,parley_client=debug,parley_store=info")
        }))
        .init();

    info!("Starting Parley server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Message store
    // -----------------------------------------------------------------------
    let store = if config.seed_demo {
        let documents = seed::demo_documents(chrono::Utc::now().timestamp_millis());
        info!(documents = documents.len(), "Seeding demo conversations");
        MemoryStore::with_documents(documents)
    } else {
        MemoryStore::new()
    };

    let http_addr = config.http_addr;
    let app_state = AppState {
        store: Arc::new(store),
        config: Arc::new(config),
    };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP API server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
