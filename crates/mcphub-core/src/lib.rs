//! # MCP Hub Core Library
//!
//! Canonical registry model, dual-schema normalization, and catalog services
//! for the MCP server hub.
//!
//! ## Modules
//!
//! - `registry` - Wire schema, canonical types, normalization, category rules
//! - `service` - Registry HTTP client, paginated aggregation, catalog cache

pub mod registry;
pub mod service;

// Re-export commonly used types
pub use registry::*;
pub use service::*;
