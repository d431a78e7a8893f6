//! MCP Server Registry
//!
//! This module defines the wire schema for the official MCP registry and the
//! canonical model the rest of the application operates on. The registry has
//! shipped two response generations (a legacy flat schema and the current
//! nested `{server, _meta}` schema); both are decoded here and normalized
//! into one stable shape.

mod category;
mod fallback;
mod normalize;
mod schema;
mod types;

pub use category::*;
pub use fallback::*;
pub use normalize::*;
pub use schema::*;
pub use types::*;
