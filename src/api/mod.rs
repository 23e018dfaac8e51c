//! HTTP API for the highlight service
//!
//! Serves the club page, the `/search` endpoint and a status endpoint.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::pipeline::HighlightService;

pub mod handlers;
pub mod models;
pub mod server;

pub use server::{router, AppState};

/// API server wrapping a shared [`HighlightService`]
pub struct ApiServer {
    service: Arc<HighlightService>,
    config: Arc<Config>,
}

impl ApiServer {
    pub fn new(service: Arc<HighlightService>, config: Arc<Config>) -> Self {
        Self { service, config }
    }

    pub fn state(&self) -> AppState {
        AppState {
            service: Arc::clone(&self.service),
            config: Arc::clone(&self.config),
        }
    }

    /// Run the API server until it fails
    pub async fn start(self) -> Result<()> {
        info!(
            "🚀 Starting API server on {}:{}",
            self.config.server.host, self.config.server.port
        );
        server::start_http_server(self.state()).await
    }
}
