//! HTTP networking module
//!
//! Request construction, transport, and the closed sets of routes and
//! response formats a SearXNG instance understands.

mod client;
mod endpoint;
mod format;

pub use client::{ApiRequest, HttpClient, HttpMethod};
pub use endpoint::Endpoint;
pub use format::OutputFormat;
