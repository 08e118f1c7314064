//! Server plugin listings
//!
//! The client does not run plugins; it reports which ones a server has
//! enabled or disabled.

mod selection;
mod status;

pub use selection::{PluginInfo, PluginSelection};
pub use status::PluginStatus;
