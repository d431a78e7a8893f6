//! In-memory catalog built from aggregated registry data
//!
//! The catalog is the application-facing view: aggregated, normalized,
//! classified, and queryable entirely client-side. When the registry yields
//! nothing usable the static fallback set is installed instead, so callers
//! always see a populated catalog.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::registry::{fallback_servers, McpServer};
use super::registry_client::{RegistryClient, RegistryTransport};

/// Refresh window matching the original hub's 5-minute revalidate TTL
pub const DEFAULT_REFRESH_TTL: Duration = Duration::from_secs(300);

/// Immutable snapshot of the server catalog with client-side queries
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    servers: Vec<McpServer>,
}

impl Catalog {
    pub fn new(servers: Vec<McpServer>) -> Self {
        Self { servers }
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn servers(&self) -> &[McpServer] {
        &self.servers
    }

    pub fn get(&self, id: &str) -> Option<&McpServer> {
        self.servers.iter().find(|s| s.id == id)
    }

    /// Case-insensitive substring search over name, id, and description.
    pub fn search(&self, query: &str) -> Vec<&McpServer> {
        let query = query.to_lowercase();
        self.servers
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&query)
                    || s.id.to_lowercase().contains(&query)
                    || s.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    pub fn by_category(&self, category: &str) -> Vec<&McpServer> {
        self.servers
            .iter()
            .filter(|s| s.category.as_deref() == Some(category))
            .collect()
    }

    /// Category labels with record counts, sorted by label.
    pub fn categories(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for server in &self.servers {
            if let Some(category) = &server.category {
                *counts.entry(category.clone()).or_default() += 1;
            }
        }
        counts.into_iter().collect()
    }
}

/// Catalog snapshot plus refresh bookkeeping, behind one lock so a reader
/// never sees a new catalog paired with a stale flag.
#[derive(Debug, Default)]
struct CatalogState {
    catalog: Catalog,
    last_refresh: Option<Instant>,
    is_fallback: bool,
}

/// Service owning the registry client and the cached catalog.
///
/// Refreshes are TTL-gated; each refresh aggregates the registry, classifies
/// every record, and swaps the snapshot atomically.
pub struct CatalogService<T: RegistryTransport> {
    client: RegistryClient<T>,
    state: RwLock<CatalogState>,
    refresh_ttl: Duration,
}

impl<T: RegistryTransport> CatalogService<T> {
    pub fn new(client: RegistryClient<T>) -> Self {
        Self {
            client,
            state: RwLock::new(CatalogState::default()),
            refresh_ttl: DEFAULT_REFRESH_TTL,
        }
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    pub fn client(&self) -> &RegistryClient<T> {
        &self.client
    }

    /// True when the catalog has never refreshed or the TTL has elapsed.
    pub async fn should_refresh(&self) -> bool {
        match self.state.read().await.last_refresh {
            Some(time) => time.elapsed() > self.refresh_ttl,
            None => true,
        }
    }

    /// True when the current snapshot is the static fallback set.
    pub async fn is_fallback(&self) -> bool {
        self.state.read().await.is_fallback
    }

    /// Aggregate the registry, classify, and swap the catalog.
    ///
    /// A failed or empty aggregation installs the fallback set; an empty
    /// result is a valid state, never an error surfaced to callers. Returns
    /// the new catalog size.
    pub async fn refresh(&self) -> usize {
        let aggregated = match self.client.fetch_all(None).await {
            Ok(servers) => servers,
            Err(e) => {
                warn!("Registry aggregation failed: {}", e);
                Vec::new()
            }
        };

        let (servers, fallback) = if aggregated.is_empty() {
            warn!("Registry returned no usable servers, installing fallback catalog");
            (fallback_servers(), true)
        } else {
            let mut servers = aggregated;
            for server in &mut servers {
                server.categorize();
            }
            (servers, false)
        };

        let len = servers.len();
        {
            let mut state = self.state.write().await;
            state.catalog = Catalog::new(servers);
            state.is_fallback = fallback;
            state.last_refresh = Some(Instant::now());
        }

        info!(
            "Catalog refreshed: {} servers{}",
            len,
            if fallback { " (fallback)" } else { "" }
        );
        len
    }

    /// Refresh only when the TTL has elapsed.
    pub async fn ensure_fresh(&self) {
        if self.should_refresh().await {
            self.refresh().await;
        }
    }

    /// Clone the current snapshot.
    pub async fn snapshot(&self) -> Catalog {
        self.state.read().await.catalog.clone()
    }

    /// Snapshot together with the fallback flag, read under one lock so the
    /// pair always describes the same refresh.
    pub async fn snapshot_with_status(&self) -> (Catalog, bool) {
        let state = self.state.read().await;
        (state.catalog.clone(), state.is_fallback)
    }

    /// Look up one server: catalog first, then a single-record fetch.
    ///
    /// The fetched record gets classified like aggregated ones. A lookup
    /// miss is `None`, whatever the underlying cause.
    pub async fn get_or_fetch(&self, id: &str) -> Option<McpServer> {
        if let Some(server) = self.state.read().await.catalog.get(id) {
            return Some(server.clone());
        }

        match self.client.fetch_server(id).await {
            Ok(mut server) => {
                server.categorize();
                Some(server)
            }
            Err(e) => {
                warn!("Server lookup for {} failed: {}", id, e);
                None
            }
        }
    }
}
