//! # Debtkit Server
//!
//! REST server for the Debtkit SME debt toolkit.
//!
//! ## Features
//!
//! - JSON endpoints for every calculator
//! - Calculation history with insights, recommendations and export
//! - Health endpoint
//! - Configuration via TOML file
//!
//! ## Usage
//!
//! ```ignore
//! use debtkit_server::{Server, ServerConfig};
//!
//! let server = Server::new(ServerConfig::default())?;
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use debtkit_history::{AnalyticsTracker, HistoryResult, HistoryStore, InMemoryHistoryStore, RedbHistoryStore};

pub use config::{HistoryConfig, ServerConfig};

/// The Debtkit server.
pub struct Server {
    config: ServerConfig,
    tracker: AnalyticsTracker,
}

impl Server {
    /// Create a server, opening the configured history store.
    ///
    /// # Errors
    ///
    /// Returns an error if the history file cannot be opened.
    pub fn new(config: ServerConfig) -> HistoryResult<Self> {
        let store: Arc<dyn HistoryStore> = match &config.history.storage_path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                info!("Keeping calculation history in {}", path.display());
                Arc::new(RedbHistoryStore::open(path)?)
            }
            None => {
                info!("Keeping calculation history in memory");
                Arc::new(InMemoryHistoryStore::new())
            }
        };

        let tracker = AnalyticsTracker::with_capacity(store, config.history.capacity);
        Ok(Self { config, tracker })
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router_with_tracker(self.tracker.clone(), self.config.policy)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = SocketAddr::new(
            self.config.host.parse().unwrap_or([0, 0, 0, 0].into()),
            self.config.port,
        );

        info!("Starting Debtkit server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }
}
