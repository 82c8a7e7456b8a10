//! # FanHub API Server
//!
//! REST API over the cached dashboard content, consumed by the web frontend.
//!
//! ## Endpoints
//!
//! - `GET /api/v1/{news,team,schedule,stats,trends,videos}/:esport` - Single panels
//! - `GET /api/v1/dashboard/:esport` - Every panel at once
//! - `POST /api/v1/auth/{register,login,logout}`, `GET /api/v1/auth/me` - Accounts
//! - `GET /api/v1/cache/stats` - Cache counters
//!
//! ## Example
//!
//! ```rust,ignore
//! use fanhub_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::new(ApiConfig::from_env())?;
//! server.run(([0, 0, 0, 0], 3001)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{AppState, ApiConfig};
pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// API server for FanHub.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> fanhub_core::Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
        })
    }

    /// Creates a server over prepared state.
    pub fn with_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Starts the periodic purge of expired cache entries.
    ///
    /// Returns `None` when `sweep_interval_secs` is 0.
    pub fn spawn_sweeper(&self) -> Option<JoinHandle<()>> {
        let secs = self.state.config.sweep_interval_secs;
        if secs == 0 {
            return None;
        }

        let state = self.state.clone();
        Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(secs));
            // First tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let purged = state.content.purge_expired();
                debug!(purged, "Cache sweep");
            }
        }))
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        let sweeper = self.spawn_sweeper();
        info!(
            ttl_minutes = self.state.config.cache_ttl_minutes,
            sweep = sweeper.is_some(),
            "FanHub API server listening on {}",
            addr
        );

        let result = axum::serve(listener, self.router()).await;
        if let Some(handle) = sweeper {
            handle.abort();
        }
        result
    }
}

/// Starts the API server with configuration from the environment.
pub async fn start_server(port: u16) -> std::io::Result<()> {
    let server = ApiServer::new(ApiConfig::from_env())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    server.run(([0, 0, 0, 0], port)).await
}
