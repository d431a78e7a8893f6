//! Gateway binary entry point

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mcphub_core::service::{CatalogService, RegistryClient, RegistryConfig};
use mcphub_gateway::{GatewayConfig, GatewayServer};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut registry_config = RegistryConfig::default();
    if let Ok(base_url) = std::env::var("MCPHUB_REGISTRY_URL") {
        registry_config.base_url = base_url;
    }

    let mut gateway_config = GatewayConfig::default();
    if let Ok(port) = std::env::var("MCPHUB_PORT") {
        gateway_config.port = port.parse()?;
    }
    if let Ok(host) = std::env::var("MCPHUB_HOST") {
        gateway_config.host = host;
    }

    info!("Registry upstream: {}", registry_config.base_url);

    let catalog = Arc::new(CatalogService::new(RegistryClient::new(registry_config)));

    // Warm the catalog before accepting traffic; a failed refresh installs
    // the fallback set, so startup never blocks on the upstream.
    catalog.refresh().await;

    GatewayServer::new(gateway_config, catalog).run().await
}
