//! Static fallback catalog
//!
//! A small hand-curated set of well-known servers, installed when the
//! registry is unreachable or returns zero usable records. An empty or
//! partial aggregate is a valid state; the catalog is never blocked on
//! upstream availability.

use super::normalize::parse_timestamp;
use super::types::{McpServer, Package, Repository, VersionDetail};

struct FallbackSpec {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    package_type: &'static str,
    identifier: &'static str,
    repo_url: &'static str,
    version: &'static str,
    created_at: &'static str,
    updated_at: &'static str,
}

const FALLBACK_SPECS: &[FallbackSpec] = &[
    FallbackSpec {
        id: "io.github.github/github-mcp-server",
        name: "github/github-mcp-server",
        description: "GitHub's official MCP Server — manage repos, issues, PRs, and code via natural language.",
        category: "Dev Tools",
        package_type: "docker",
        identifier: "ghcr.io/github/github-mcp-server",
        repo_url: "https://github.com/github/github-mcp-server",
        version: "0.3.0",
        created_at: "2025-04-01T00:00:00Z",
        updated_at: "2025-12-01T00:00:00Z",
    },
    FallbackSpec {
        id: "io.github.modelcontextprotocol/server-filesystem",
        name: "modelcontextprotocol/server-filesystem",
        description: "Secure file operations with configurable access controls for local filesystem.",
        category: "Files & Storage",
        package_type: "npm",
        identifier: "@modelcontextprotocol/server-filesystem",
        repo_url: "https://github.com/modelcontextprotocol/servers",
        version: "0.6.2",
        created_at: "2024-11-01T00:00:00Z",
        updated_at: "2025-11-01T00:00:00Z",
    },
    FallbackSpec {
        id: "io.github.modelcontextprotocol/server-fetch",
        name: "modelcontextprotocol/server-fetch",
        description: "Web content fetching and conversion for efficient LLM usage.",
        category: "Web & Search",
        package_type: "npm",
        identifier: "@modelcontextprotocol/server-fetch",
        repo_url: "https://github.com/modelcontextprotocol/servers",
        version: "0.6.2",
        created_at: "2024-11-01T00:00:00Z",
        updated_at: "2025-11-01T00:00:00Z",
    },
    FallbackSpec {
        id: "io.github.modelcontextprotocol/server-memory",
        name: "modelcontextprotocol/server-memory",
        description: "Knowledge graph-based persistent memory system for AI agents.",
        category: "Memory",
        package_type: "npm",
        identifier: "@modelcontextprotocol/server-memory",
        repo_url: "https://github.com/modelcontextprotocol/servers",
        version: "0.6.2",
        created_at: "2024-11-01T00:00:00Z",
        updated_at: "2025-11-01T00:00:00Z",
    },
    FallbackSpec {
        id: "io.github.modelcontextprotocol/server-git",
        name: "modelcontextprotocol/server-git",
        description: "Tools to read, search, and manipulate Git repositories.",
        category: "Dev Tools",
        package_type: "npm",
        identifier: "@modelcontextprotocol/server-git",
        repo_url: "https://github.com/modelcontextprotocol/servers",
        version: "0.6.2",
        created_at: "2024-11-01T00:00:00Z",
        updated_at: "2025-11-01T00:00:00Z",
    },
    FallbackSpec {
        id: "io.github.modelcontextprotocol/server-sequential-thinking",
        name: "modelcontextprotocol/server-sequential-thinking",
        description: "Dynamic and reflective problem-solving through thought sequences.",
        category: "AI & ML",
        package_type: "npm",
        identifier: "@modelcontextprotocol/server-sequential-thinking",
        repo_url: "https://github.com/modelcontextprotocol/servers",
        version: "0.6.2",
        created_at: "2024-11-01T00:00:00Z",
        updated_at: "2025-11-01T00:00:00Z",
    },
    FallbackSpec {
        id: "io.github.modelcontextprotocol/server-postgres",
        name: "modelcontextprotocol/server-postgres",
        description: "Read-only database access with schema inspection and SQL query execution.",
        category: "Database",
        package_type: "npm",
        identifier: "@modelcontextprotocol/server-postgres",
        repo_url: "https://github.com/modelcontextprotocol/servers",
        version: "0.6.2",
        created_at: "2024-11-01T00:00:00Z",
        updated_at: "2025-11-01T00:00:00Z",
    },
];

/// Build the fallback catalog. Categories are pre-assigned.
pub fn fallback_servers() -> Vec<McpServer> {
    FALLBACK_SPECS
        .iter()
        .map(|spec| McpServer {
            id: spec.id.to_string(),
            name: spec.name.to_string(),
            description: spec.description.to_string(),
            created_at: parse_timestamp(Some(spec.created_at)),
            updated_at: parse_timestamp(Some(spec.updated_at)),
            version_detail: Some(VersionDetail {
                version: spec.version.to_string(),
                release_date: parse_timestamp(Some(spec.updated_at)),
                is_latest: true,
            }),
            packages: vec![Package {
                package_type: spec.package_type.to_string(),
                identifier: spec.identifier.to_string(),
                version: None,
                env_vars: Vec::new(),
            }],
            repository: Some(Repository {
                url: Some(spec.repo_url.to_string()),
                source: Some("github".to_string()),
            }),
            remotes: Vec::new(),
            website_url: None,
            category: Some(spec.category.to_string()),
        })
        .collect()
}
