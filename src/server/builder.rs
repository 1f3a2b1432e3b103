//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{UploadRoute, build_router};
use crate::config::AppConfig;
use crate::core::service::OrderService;
use crate::core::store::OrderStore;
use crate::core::upload::{ImageStore, LocalImageStore, normalize_public_prefix};
use anyhow::Result;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the order backend's HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::load()?)
///     .with_order_store(Arc::new(InMemoryOrderStore::new()))
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    order_store: Option<Arc<dyn OrderStore>>,
    image_store: Option<Arc<dyn ImageStore>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default configuration
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            order_store: None,
            image_store: None,
        }
    }

    /// Use this configuration
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the order store (required)
    pub fn with_order_store(mut self, store: Arc<dyn OrderStore>) -> Self {
        self.order_store = Some(store);
        self
    }

    /// Replace the image store.
    ///
    /// Defaults to a [`LocalImageStore`] built from the `uploads` configuration.
    pub fn with_image_store(mut self, store: Arc<dyn ImageStore>) -> Self {
        self.image_store = Some(store);
        self
    }

    /// Build the order service from the registered stores
    pub fn build_service(&mut self) -> Result<OrderService> {
        let order_store = self
            .order_store
            .take()
            .ok_or_else(|| anyhow::anyhow!("OrderStore is required. Call .with_order_store()"))?;

        let uploads = &self.config.uploads;
        let image_store: Arc<dyn ImageStore> = match self.image_store.take() {
            Some(store) => store,
            None => Arc::new(LocalImageStore::new(&uploads.dir, &uploads.public_prefix)),
        };

        Ok(OrderService::new(order_store, image_store)
            .with_limits(self.config.orders.default_limit, self.config.orders.max_limit))
    }

    /// Build the REST router
    pub fn build(mut self) -> Result<Router> {
        let service = self.build_service()?;
        let state = AppState {
            service,
            database_url_configured: self.config.database.url.is_some(),
        };

        let uploads = &self.config.uploads;
        let public_prefix = normalize_public_prefix(&uploads.public_prefix);
        Ok(build_router(
            state,
            UploadRoute {
                public_prefix: &public_prefix,
                dir: Path::new(&uploads.dir),
                max_body_bytes: uploads.max_body_bytes,
            },
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured host and port
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
