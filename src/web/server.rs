//! Web server for aart.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::{Config, StorageConfig, WebConfig};
use crate::world::WorldStorage;
use crate::{AartError, Result};

use super::handlers::AppState;
use super::router::create_router;

/// Web server for the storage API.
pub struct WebServer {
    /// Host and port to bind.
    bind: String,
    /// Application state.
    app_state: Arc<AppState>,
    /// Web configuration.
    web_config: WebConfig,
    /// Storage configuration.
    storage_config: StorageConfig,
}

impl WebServer {
    /// Create a new web server, creating the worlds directory if needed.
    pub fn new(config: &Config) -> Result<Self> {
        let storage = WorldStorage::new(&config.storage.root_path)?;
        tracing::info!("World storage initialized at: {}", config.storage.root_path);

        Ok(Self {
            bind: format!("{}:{}", config.server.host, config.server.port),
            app_state: Arc::new(AppState::new(storage)),
            web_config: config.web.clone(),
            storage_config: config.storage.clone(),
        })
    }

    /// Get the configured bind address.
    pub fn bind_address(&self) -> &str {
        &self.bind
    }

    fn router(&self) -> Router {
        create_router(
            self.app_state.clone(),
            &self.web_config,
            &self.storage_config,
        )
        .layer(CompressionLayer::new())
    }

    async fn listen(&self) -> Result<TcpListener> {
        TcpListener::bind(&self.bind).await.map_err(|e| {
            AartError::Config(format!("failed to bind {}: {e}", self.bind))
        })
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> Result<()> {
        let router = self.router();
        let listener = self.listen().await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let router = self.router();
        let listener = self.listen().await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
