//! HTTP client for the MCP registry API
//!
//! Fetches `/v0/servers` pages and single records from the upstream
//! registry, normalizes them, and aggregates cursor-based pagination with a
//! page-count safeguard. The HTTP boundary sits behind the
//! [`RegistryTransport`] trait so aggregation logic is testable against an
//! in-memory transport.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::registry::{
    normalize_page, normalize_value, McpServer, NormalizeError, RawRegistryResponse, RegistryPage,
};

/// Official registry base URL
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.modelcontextprotocol.io";

/// Page size requested from the registry
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Upper bound on pages walked per aggregation. Keeps a misbehaving or
/// adversarial upstream from turning the cursor walk into an unbounded loop.
pub const DEFAULT_MAX_PAGES: u32 = 5;

/// Registry client configuration
///
/// Everything that was an implicit constant in the original hub (base URL,
/// page limit, safeguard) is explicit here so tests can inject values.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub base_url: String,
    pub page_limit: u32,
    pub max_pages: u32,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            max_pages: DEFAULT_MAX_PAGES,
            timeout: Duration::from_secs(30),
            user_agent: "mcp-hub/1.0".to_string(),
        }
    }
}

/// Errors from the registry HTTP boundary
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("registry returned status {status}")]
    Status { status: u16 },

    #[error("failed to decode registry response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid registry URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Parameters for one `/v0/servers` page request
#[derive(Debug, Clone, Default)]
pub struct PageQuery {
    /// Opaque pagination token from the previous page
    pub cursor: Option<String>,
    /// Requested page size, sent to the wire verbatim
    pub limit: Option<String>,
    /// Server-side search query (`q`)
    pub query: Option<String>,
}

/// The HTTP boundary, abstracted for testing.
///
/// Implementations return raw JSON bodies; decoding and normalization happen
/// in [`RegistryClient`] so the gateway proxy can also pass bodies through
/// untouched.
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    /// Fetch one page of the server list.
    async fn fetch_page(&self, query: &PageQuery) -> Result<Value, RegistryError>;

    /// Fetch a single server record by id.
    async fn fetch_entry(&self, id: &str) -> Result<Value, RegistryError>;
}

/// Production transport over reqwest
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &RegistryConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: config.base_url.clone(),
            client,
        }
    }

    fn servers_url(&self, query: &PageQuery) -> Result<Url, RegistryError> {
        let mut url = Url::parse(&format!("{}/v0/servers", self.base_url))?;
        {
            let mut params = url.query_pairs_mut();
            if let Some(cursor) = &query.cursor {
                params.append_pair("cursor", cursor);
            }
            if let Some(limit) = &query.limit {
                params.append_pair("limit", limit);
            }
            if let Some(q) = &query.query {
                params.append_pair("q", q);
            }
        }
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, RegistryError> {
        debug!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl RegistryTransport for HttpTransport {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Value, RegistryError> {
        self.get_json(self.servers_url(query)?).await
    }

    async fn fetch_entry(&self, id: &str) -> Result<Value, RegistryError> {
        let url = Url::parse(&format!(
            "{}/v0/servers/{}",
            self.base_url,
            urlencoding::encode(id)
        ))?;
        self.get_json(url).await
    }
}

/// Client combining a transport with normalization and aggregation
pub struct RegistryClient<T = HttpTransport> {
    transport: T,
    config: RegistryConfig,
}

impl RegistryClient<HttpTransport> {
    /// Create a client over the real HTTP transport.
    pub fn new(config: RegistryConfig) -> Self {
        let transport = HttpTransport::new(&config);
        Self { transport, config }
    }
}

impl<T: RegistryTransport> RegistryClient<T> {
    /// Create a client over a custom transport (tests inject mocks here).
    pub fn with_transport(transport: T, config: RegistryConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch and normalize one page.
    pub async fn fetch_page(&self, query: &PageQuery) -> Result<RegistryPage, RegistryError> {
        let body = self.transport.fetch_page(query).await?;
        let raw: RawRegistryResponse = serde_json::from_value(body)?;
        Ok(normalize_page(raw))
    }

    /// Fetch and normalize a single server record.
    ///
    /// Handles both the wrapped `{server, _meta}` body and a bare legacy
    /// record, same as list items.
    pub async fn fetch_server(&self, id: &str) -> Result<McpServer, RegistryError> {
        let body = self.transport.fetch_entry(id).await?;
        Ok(normalize_value(body)?)
    }

    /// Walk the registry's cursor pagination and aggregate all records.
    ///
    /// Requests are strictly sequential: each cursor comes from the previous
    /// page. The walk stops when the cursor is absent or after
    /// `config.max_pages` pages. A failure on the first page propagates; a
    /// failure on any later page truncates the walk and returns what was
    /// accumulated. Records that fail normalization are dropped per page,
    /// never fatal.
    pub async fn fetch_all(&self, search: Option<&str>) -> Result<Vec<McpServer>, RegistryError> {
        let mut all = Vec::new();
        let mut cursor: Option<String> = None;

        for page_index in 0..self.config.max_pages {
            let query = PageQuery {
                cursor: cursor.take(),
                limit: Some(self.config.page_limit.to_string()),
                query: search.map(str::to_string),
            };

            let page = match self.fetch_page(&query).await {
                Ok(page) => page,
                Err(e) if page_index == 0 => return Err(e),
                Err(e) => {
                    warn!(
                        "Registry page {} fetch failed, returning partial results: {}",
                        page_index + 1,
                        e
                    );
                    break;
                }
            };

            all.extend(page.servers);

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        info!("Aggregated {} servers from registry", all.len());
        Ok(all)
    }
}
