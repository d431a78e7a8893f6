//! Canonical types for the MCP server catalog
//!
//! These are the schema-stable shapes every downstream consumer operates on,
//! produced by the normalizer from either raw registry generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Environment variable declared by a server package
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EnvVar {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub secret: bool,

    /// Default value, if the package declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Distribution package after normalization
///
/// Invariant: `package_type` is lowercased and `"oci"` has been rewritten to
/// `"docker"`, so `"npm"`, `"pypi"` and `"docker"` are the only values the
/// install-command mapping needs to know about. It is empty only when the
/// source package carried no type field at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Package {
    #[serde(rename = "type")]
    pub package_type: String,

    /// Package coordinate, e.g. "@modelcontextprotocol/server-memory"
    pub identifier: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env_vars: Vec<EnvVar>,
}

impl Package {
    /// Shell one-liner for running this package, if the type is one we know
    /// how to launch.
    pub fn install_command(&self) -> Option<String> {
        if self.identifier.is_empty() {
            return None;
        }
        match self.package_type.as_str() {
            "npm" => Some(format!("npx {}", self.identifier)),
            "pypi" => Some(format!("uvx {}", self.identifier)),
            "docker" => Some(format!("docker run {}", self.identifier)),
            _ => None,
        }
    }
}

/// Source repository link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Repository {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Hosting source, e.g. "github"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Published version information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionDetail {
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,

    pub is_latest: bool,
}

/// Remote (hosted) endpoint for a server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Remote {
    #[serde(rename = "type")]
    pub remote_type: String,
    pub url: String,
}

/// Canonical MCP server record
///
/// Timestamps are optional on purpose: when the registry metadata omits them
/// we leave them absent instead of fabricating a "just seen" value.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct McpServer {
    /// Identity, derived from the registry name slug. The official registry
    /// enforces reverse-DNS uniqueness on names, so the slug doubles as a
    /// stable key.
    pub id: String,

    pub name: String,

    /// Short description; empty string when the source had neither a
    /// description nor a title.
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_detail: Option<VersionDetail>,

    /// Order preserved from the source record
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<Package>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remotes: Vec<Remote>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

    /// Derived display category; absent until classification runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl McpServer {
    /// Install command for the primary (first) package, if any.
    pub fn install_command(&self) -> Option<String> {
        self.packages.first().and_then(Package::install_command)
    }

    /// Primary package type label, e.g. "npm"
    pub fn package_type(&self) -> Option<&str> {
        self.packages
            .first()
            .map(|p| p.package_type.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Source repository URL, if published
    pub fn repo_url(&self) -> Option<&str> {
        self.repository.as_ref().and_then(|r| r.url.as_deref())
    }
}

/// One normalized page of registry results
///
/// `next_cursor` is present iff the upstream has more results; its absence
/// terminates pagination.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistryPage {
    pub servers: Vec<McpServer>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}
