//! Raw wire schema for the registry API
//!
//! The registry has shipped two incompatible response generations:
//!
//! - **Current**: list items are wrappers `{ "server": {...}, "_meta": {...} }`,
//!   packages use `registryType`/`identifier`/`environmentVariables`, and the
//!   page cursor lives at `metadata.nextCursor`.
//! - **Legacy**: list items are flat server objects with `registry_name`/`name`/
//!   `environment_variables` packages and a top-level `next_cursor`.
//!
//! Everything here is deserialize-only. Items inside a page are kept as raw
//! JSON values so one malformed record can never fail the whole page decode;
//! per-item decoding happens in [`normalize`](super::normalize).

use serde::Deserialize;
use serde_json::Value;

/// One list item from the registry, either generation.
///
/// Variant order matters: the current shape is tried first and is
/// disambiguated by its required `server` sub-object. Anything else falls
/// through to the legacy flat shape, whose fields are all optional so that
/// identity validation can happen in the normalizer instead of here.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawServerEntry {
    Current(CurrentEntry),
    Legacy(LegacyServer),
}

/// Current-generation list item: `{ server, _meta }`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentEntry {
    pub server: CurrentServer,
    #[serde(default, rename = "_meta")]
    pub meta: Option<EntryMeta>,
}

/// The `server` sub-object of a current-generation item
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentServer {
    /// Reverse-DNS name slug, e.g. "io.github.github/github-mcp-server".
    /// Optional here so a nameless record still decodes as this variant and
    /// gets reported as malformed rather than misread as legacy.
    pub name: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub version: Option<String>,
    #[serde(rename = "websiteUrl")]
    pub website_url: Option<String>,
    pub repository: Option<RawRepository>,
    #[serde(default)]
    pub packages: Vec<RawPackage>,
    #[serde(default)]
    pub remotes: Vec<RawRemote>,
}

/// `_meta` wrapper keyed by the official registry namespace
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryMeta {
    #[serde(rename = "io.modelcontextprotocol.registry/official")]
    pub official: Option<OfficialMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficialMeta {
    pub status: Option<String>,
    pub published_at: Option<String>,
    pub updated_at: Option<String>,
    pub is_latest: Option<bool>,
}

/// Legacy-generation flat server record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyServer {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub version_detail: Option<RawVersionDetail>,
    #[serde(default)]
    pub packages: Vec<RawPackage>,
    pub repository: Option<RawRepository>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVersionDetail {
    pub version: Option<String>,
    pub release_date: Option<String>,
    pub is_latest: Option<bool>,
}

/// Distribution package, accepting both generations' field names
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPackage {
    /// "npm", "pypi", "oci", "docker", ... ("oci" is normalized to "docker")
    #[serde(rename = "registryType", alias = "registry_name")]
    pub registry_type: Option<String>,

    /// Package coordinate, e.g. "@modelcontextprotocol/server-memory"
    /// (legacy schema calls this `name`)
    #[serde(alias = "name")]
    pub identifier: Option<String>,

    pub version: Option<String>,

    #[serde(
        default,
        rename = "environmentVariables",
        alias = "environment_variables"
    )]
    pub environment_variables: Vec<RawEnvVar>,
}

/// Environment variable declaration, accepting both generations' field names
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEnvVar {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default, rename = "isSecret", alias = "is_secret")]
    pub is_secret: bool,
    pub default: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRepository {
    pub url: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRemote {
    #[serde(rename = "type")]
    pub remote_type: String,
    pub url: String,
}

/// One page of the `/v0/servers` list response, either generation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRegistryResponse {
    /// Items are raw values; see module docs.
    #[serde(default)]
    pub servers: Vec<Value>,

    /// Current schema: `{ "nextCursor": ..., "count": ... }`
    #[serde(default)]
    pub metadata: Option<ResponseMetadata>,

    // Legacy fallback fields
    pub next_cursor: Option<String>,
    pub total_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub next_cursor: Option<String>,
    pub count: Option<u64>,
}

impl RawRegistryResponse {
    /// Pagination cursor: current schema's `metadata.nextCursor` wins,
    /// falling back to the legacy top-level `next_cursor`.
    pub fn cursor(&self) -> Option<String> {
        self.metadata
            .as_ref()
            .and_then(|m| m.next_cursor.clone())
            .or_else(|| self.next_cursor.clone())
    }

    /// Total result count, same precedence as [`cursor`](Self::cursor).
    pub fn count(&self) -> Option<u64> {
        self.metadata
            .as_ref()
            .and_then(|m| m.count)
            .or(self.total_count)
    }
}
