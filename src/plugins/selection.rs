//! Plugin listings as reported by a server's `/config`

use super::status::PluginStatus;
use serde::{Deserialize, Serialize};

/// One entry of the `plugins` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Plugin name
    pub name: String,
    /// Whether the server runs it by default
    pub enabled: bool,
}

/// Plugin names partitioned by status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PluginSelection {
    /// Both halves, returned for [`PluginStatus::All`]
    Both {
        disabled: Vec<String>,
        enabled: Vec<String>,
    },
    /// Names matching a single status
    Only(Vec<String>),
}

impl PluginSelection {
    /// Partition `plugins` and keep the part selected by `status`
    pub fn select(plugins: &[PluginInfo], status: PluginStatus) -> Self {
        let names = |enabled: bool| -> Vec<String> {
            plugins
                .iter()
                .filter(|p| p.enabled == enabled)
                .map(|p| p.name.clone())
                .collect()
        };

        match status {
            PluginStatus::All => Self::Both {
                disabled: names(false),
                enabled: names(true),
            },
            PluginStatus::Enabled => Self::Only(names(true)),
            PluginStatus::Disabled => Self::Only(names(false)),
        }
    }
}
