//! API client module
//!
//! Builds requests from the configuration and per-call overrides, sends
//! them, and turns responses into typed values.

mod client;
mod models;

pub use client::SearxngApi;
pub use models::{RequestOptions, ResolvedOptions, SearchRequest};
