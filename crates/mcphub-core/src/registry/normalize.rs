//! Dual-schema normalization
//!
//! Converts raw registry records (either generation, see
//! [`schema`](super::schema)) into the canonical [`McpServer`] model. All
//! field fallbacks live here, in one exhaustive match per variant, so each
//! one is testable in isolation.

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use super::schema::{
    CurrentEntry, LegacyServer, OfficialMeta, RawEnvVar, RawPackage, RawRegistryResponse,
    RawRepository, RawServerEntry,
};
use super::types::{EnvVar, McpServer, Package, RegistryPage, Remote, Repository, VersionDetail};

/// Why a single registry record could not be normalized.
///
/// Both variants are recoverable: callers drop the record and keep the batch.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The record carries no identity at all (no legacy `name`/`id` and no
    /// `server.name`).
    #[error("record has no name or id field")]
    MalformedRecord,

    /// The record matches neither known registry shape.
    #[error("record matches no known registry schema: {0}")]
    SchemaDrift(#[source] serde_json::Error),
}

/// Normalize one raw JSON item from a page or single-record response.
pub fn normalize_value(value: Value) -> Result<McpServer, NormalizeError> {
    let entry: RawServerEntry =
        serde_json::from_value(value).map_err(NormalizeError::SchemaDrift)?;
    normalize_entry(entry)
}

/// Normalize an already-decoded registry entry.
pub fn normalize_entry(entry: RawServerEntry) -> Result<McpServer, NormalizeError> {
    match entry {
        RawServerEntry::Current(entry) => normalize_current(entry),
        RawServerEntry::Legacy(server) => normalize_legacy(server),
    }
}

/// Normalize a whole page: cursor precedence plus per-item normalization.
///
/// Records that fail to normalize are dropped with a warning; a bad item
/// never fails the page.
pub fn normalize_page(raw: RawRegistryResponse) -> RegistryPage {
    let next_cursor = raw.cursor();
    let total_count = raw.count();

    let mut servers = Vec::with_capacity(raw.servers.len());
    for item in raw.servers {
        match normalize_value(item) {
            Ok(server) => servers.push(server),
            Err(e) => warn!("Skipping registry record: {}", e),
        }
    }

    RegistryPage {
        servers,
        next_cursor,
        total_count,
    }
}

fn normalize_current(entry: CurrentEntry) -> Result<McpServer, NormalizeError> {
    let server = entry.server;
    let name = server
        .name
        .filter(|n| !n.is_empty())
        .ok_or(NormalizeError::MalformedRecord)?;

    let meta = entry
        .meta
        .and_then(|m| m.official)
        .unwrap_or_else(OfficialMeta::default);

    let updated_at = parse_timestamp(meta.updated_at.as_deref());

    // version_detail exists only when the server declares a version;
    // release_date mirrors the metadata's update time.
    let version_detail = server.version.map(|version| VersionDetail {
        version,
        release_date: updated_at,
        is_latest: meta.is_latest.unwrap_or(true),
    });

    Ok(McpServer {
        id: name.clone(),
        name,
        description: server.description.or(server.title).unwrap_or_default(),
        created_at: parse_timestamp(meta.published_at.as_deref()),
        updated_at,
        version_detail,
        packages: server.packages.into_iter().map(normalize_package).collect(),
        repository: server.repository.map(normalize_repository),
        remotes: server
            .remotes
            .into_iter()
            .map(|r| Remote {
                remote_type: r.remote_type,
                url: r.url,
            })
            .collect(),
        website_url: server.website_url,
        category: None,
    })
}

fn normalize_legacy(server: LegacyServer) -> Result<McpServer, NormalizeError> {
    // Either field may identify a legacy record; require at least one.
    let (id, name) = match (server.id, server.name) {
        (Some(id), Some(name)) => (id, name),
        (Some(id), None) => (id.clone(), id),
        (None, Some(name)) => (name.clone(), name),
        (None, None) => return Err(NormalizeError::MalformedRecord),
    };

    let version_detail = server.version_detail.and_then(|detail| {
        detail.version.map(|version| VersionDetail {
            version,
            release_date: parse_timestamp(detail.release_date.as_deref()),
            is_latest: detail.is_latest.unwrap_or(true),
        })
    });

    Ok(McpServer {
        id,
        name,
        description: server.description.unwrap_or_default(),
        created_at: parse_timestamp(server.created_at.as_deref()),
        updated_at: parse_timestamp(server.updated_at.as_deref()),
        version_detail,
        packages: server.packages.into_iter().map(normalize_package).collect(),
        repository: server.repository.map(normalize_repository),
        remotes: Vec::new(),
        website_url: None,
        category: None,
    })
}

fn normalize_package(raw: RawPackage) -> Package {
    let package_type = raw
        .registry_type
        .map(|t| {
            let t = t.to_lowercase();
            // "oci" is the current registry's synonym for docker images
            if t == "oci" {
                "docker".to_string()
            } else {
                t
            }
        })
        .unwrap_or_default();

    Package {
        package_type,
        identifier: raw.identifier.unwrap_or_default(),
        version: raw.version,
        env_vars: raw
            .environment_variables
            .into_iter()
            .map(normalize_env_var)
            .collect(),
    }
}

fn normalize_env_var(raw: RawEnvVar) -> EnvVar {
    EnvVar {
        name: raw.name,
        description: raw.description,
        required: raw.is_required,
        secret: raw.is_secret,
        default: raw.default,
    }
}

fn normalize_repository(raw: RawRepository) -> Repository {
    Repository {
        url: raw.url,
        source: raw.source,
    }
}

/// Lenient RFC 3339 parse; anything unparsable is treated as absent.
pub(crate) fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
