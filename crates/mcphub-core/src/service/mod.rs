//! Domain services: registry HTTP client and catalog cache

mod catalog;
mod registry_client;

pub use catalog::*;
pub use registry_client::*;
