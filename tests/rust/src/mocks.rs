//! Mock transport implementations for testing
//!
//! In-memory `RegistryTransport` stand-ins so aggregation and catalog logic
//! can be exercised without a network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use mcphub_core::service::{PageQuery, RegistryError, RegistryTransport};

/// One scripted response from the mock transport
pub enum MockResponse {
    Page(Value),
    Error(u16),
}

/// Scripted transport: pops pre-seeded responses in order and records every
/// page query it receives. When the script runs out it answers with an empty
/// page.
#[derive(Default)]
pub struct MockRegistryTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    entries: Mutex<VecDeque<MockResponse>>,
    page_calls: AtomicUsize,
    queries: Mutex<Vec<PageQuery>>,
}

impl MockRegistryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, body: Value) -> Self {
        self.responses.lock().unwrap().push_back(MockResponse::Page(body));
        self
    }

    pub fn with_page_error(self, status: u16) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(status));
        self
    }

    pub fn with_entry(self, body: Value) -> Self {
        self.entries.lock().unwrap().push_back(MockResponse::Page(body));
        self
    }

    /// Number of page fetches performed so far.
    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    /// Copy of every page query received, in order.
    pub fn recorded_queries(&self) -> Vec<PageQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistryTransport for MockRegistryTransport {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Value, RegistryError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());

        match self.responses.lock().unwrap().pop_front() {
            Some(MockResponse::Page(body)) => Ok(body),
            Some(MockResponse::Error(status)) => Err(RegistryError::Status { status }),
            None => Ok(json!({ "servers": [] })),
        }
    }

    async fn fetch_entry(&self, _id: &str) -> Result<Value, RegistryError> {
        match self.entries.lock().unwrap().pop_front() {
            Some(MockResponse::Page(body)) => Ok(body),
            Some(MockResponse::Error(status)) => Err(RegistryError::Status { status }),
            None => Err(RegistryError::Status { status: 404 }),
        }
    }
}

/// Transport that answers every page with a fresh cursor, to exercise the
/// page-count safeguard.
#[derive(Default)]
pub struct EndlessPagesTransport {
    page_calls: AtomicUsize,
}

impl EndlessPagesTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistryTransport for EndlessPagesTransport {
    async fn fetch_page(&self, _query: &PageQuery) -> Result<Value, RegistryError> {
        let n = self.page_calls.fetch_add(1, Ordering::SeqCst);
        let name = format!("acme/server-{}", n);
        let cursor = format!("cursor-{}", n + 1);
        Ok(current_page(&[name.as_str()], Some(&cursor)))
    }

    async fn fetch_entry(&self, _id: &str) -> Result<Value, RegistryError> {
        Err(RegistryError::Status { status: 404 })
    }
}

/// Build a current-schema page body for the given server names.
pub fn current_page(names: &[&str], next_cursor: Option<&str>) -> Value {
    let servers: Vec<Value> = names
        .iter()
        .map(|name| {
            json!({
                "server": {
                    "name": name,
                    "description": format!("{} description", name),
                    "version": "1.0.0",
                    "packages": [{ "registryType": "npm", "identifier": format!("@{}", name) }]
                },
                "_meta": {
                    "io.modelcontextprotocol.registry/official": {
                        "publishedAt": "2025-01-01T00:00:00Z",
                        "updatedAt": "2025-06-01T00:00:00Z",
                        "isLatest": true
                    }
                }
            })
        })
        .collect();

    match next_cursor {
        Some(cursor) => json!({
            "servers": servers,
            "metadata": { "nextCursor": cursor, "count": servers.len() }
        }),
        None => json!({ "servers": servers }),
    }
}

/// Build a legacy-schema page body for the given server names.
pub fn legacy_page(names: &[&str], next_cursor: Option<&str>) -> Value {
    let servers: Vec<Value> = names
        .iter()
        .map(|name| {
            json!({
                "id": name,
                "name": name,
                "description": format!("{} description", name),
                "created_at": "2024-06-01T00:00:00Z",
                "updated_at": "2024-07-01T00:00:00Z",
                "packages": [{ "registry_name": "npm", "name": format!("@{}", name) }]
            })
        })
        .collect();

    match next_cursor {
        Some(cursor) => json!({ "servers": servers, "next_cursor": cursor }),
        None => json!({ "servers": servers }),
    }
}
