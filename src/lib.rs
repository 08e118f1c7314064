//! searxng-cli: a command-line client for the SearXNG search API
//!
//! Issues searches, reads server configuration (categories, plugins) and
//! error statistics, and normalizes the responses into typed records.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod network;
pub mod plugins;
pub mod results;

pub use api::{RequestOptions, SearchRequest, SearxngApi};
pub use config::SearxngConfig;
pub use error::{Error, Result};
pub use network::{Endpoint, OutputFormat};
pub use plugins::PluginStatus;
pub use results::{SearchResponse, SearchResult};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
