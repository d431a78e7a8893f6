//! Request handlers for the gateway routes

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;

use mcphub_core::service::{CatalogService, PageQuery, RegistryError, RegistryTransport};

/// Shared handler state
pub struct AppState<T: RegistryTransport + 'static> {
    pub catalog: Arc<CatalogService<T>>,
}

impl<T: RegistryTransport> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
        }
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct ServersQuery {
    pub cursor: Option<String>,
    /// Kept as a raw string; the upstream registry validates it.
    pub limit: Option<String>,
    pub q: Option<String>,
}

/// Proxy for the upstream `/v0/servers` endpoint.
///
/// Forwards `cursor`, `limit` (default 100), and `q` verbatim, and passes
/// the upstream JSON body through untouched. A non-2xx upstream answer
/// becomes a JSON error body with the upstream's status code; a transport
/// failure becomes a 500 with an error description.
pub async fn proxy_servers<T: RegistryTransport>(
    State(state): State<AppState<T>>,
    Query(params): Query<ServersQuery>,
) -> Response {
    let query = PageQuery {
        cursor: params.cursor,
        limit: Some(params.limit.unwrap_or_else(|| "100".to_string())),
        query: params.q,
    };

    match state.catalog.client().transport().fetch_page(&query).await {
        Ok(body) => Json(body).into_response(),
        Err(RegistryError::Status { status }) => {
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                code,
                Json(json!({ "error": format!("Registry fetch failed: {}", status) })),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Failed to fetch registry",
                "details": e.to_string(),
            })),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Client-side substring search
    pub q: Option<String>,
    /// Exact category label filter
    pub category: Option<String>,
}

/// Normalized, classified catalog listing with optional search and category
/// filters.
pub async fn list_catalog<T: RegistryTransport>(
    State(state): State<AppState<T>>,
    Query(params): Query<CatalogQuery>,
) -> Response {
    state.catalog.ensure_fresh().await;
    let (snapshot, fallback) = state.catalog.snapshot_with_status().await;

    let mut servers: Vec<_> = match &params.q {
        Some(q) => snapshot.search(q).into_iter().cloned().collect(),
        None => snapshot.servers().to_vec(),
    };
    if let Some(category) = &params.category {
        servers.retain(|s| s.category.as_deref() == Some(category.as_str()));
    }

    Json(json!({
        "servers": servers,
        "total": servers.len(),
        "categories": snapshot.categories(),
        "fallback": fallback,
    }))
    .into_response()
}

/// Single catalog entry by id, fetching from the registry on a cache miss.
pub async fn get_catalog_entry<T: RegistryTransport>(
    State(state): State<AppState<T>>,
    Path(id): Path<String>,
) -> Response {
    state.catalog.ensure_fresh().await;

    match state.catalog.get_or_fetch(&id).await {
        Some(server) => Json(server).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Server not found: {}", id) })),
        )
            .into_response(),
    }
}
