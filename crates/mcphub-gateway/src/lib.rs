//! MCP Hub Gateway
//!
//! HTTP server in front of the catalog core: a same-origin proxy for the
//! upstream registry (status codes passed through) plus normalized catalog
//! endpoints and a health check.

mod handlers;

pub use handlers::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use mcphub_core::service::{CatalogService, RegistryTransport};

/// Gateway server configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS for browser access
    pub enable_cors: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            enable_cors: true,
        }
    }
}

impl GatewayConfig {
    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid address")
    }
}

/// Build the gateway router over a catalog service.
pub fn build_router<T: RegistryTransport + 'static>(
    catalog: Arc<CatalogService<T>>,
    enable_cors: bool,
) -> Router {
    let state = AppState { catalog };

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        // Same-origin registry proxy (body + status pass-through)
        .route("/v0/servers", get(handlers::proxy_servers::<T>))
        // Normalized catalog
        .route("/api/catalog", get(handlers::list_catalog::<T>))
        .route("/api/catalog/{id}", get(handlers::get_catalog_entry::<T>))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router = router.layer(cors);
    }

    router
}

/// Gateway HTTP server
pub struct GatewayServer<T: RegistryTransport + 'static> {
    config: GatewayConfig,
    catalog: Arc<CatalogService<T>>,
}

impl<T: RegistryTransport + 'static> GatewayServer<T> {
    pub fn new(config: GatewayConfig, catalog: Arc<CatalogService<T>>) -> Self {
        Self { config, catalog }
    }

    /// Run the gateway server until the listener closes.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.addr();
        let router = build_router(self.catalog, self.config.enable_cors);

        info!("[Gateway] Starting on {}", addr);
        info!(
            "[Gateway] CORS: {}",
            if self.config.enable_cors {
                "enabled"
            } else {
                "disabled"
            }
        );

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }

    /// Start the server in the background.
    pub fn spawn(self) -> tokio::task::JoinHandle<anyhow::Result<()>> {
        tokio::spawn(async move { self.run().await })
    }
}
