//! Response formats a SearXNG instance can produce

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Serialization requested from the server via the `format` parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Rss,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Json, OutputFormat::Csv, OutputFormat::Rss];

    /// Lower-case value sent to the server
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Rss => "rss",
        }
    }

    /// Canonical values, sorted
    pub fn list_valid() -> Vec<&'static str> {
        let mut valid: Vec<_> = Self::ALL.iter().map(|f| f.as_str()).collect();
        valid.sort_unstable();
        valid
    }

    /// Parse a canonical value in any case. Member names are not accepted.
    pub fn from_value(value: impl AsRef<str>) -> Result<Self> {
        let raw = value.as_ref();
        let lower = raw.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == lower)
            .ok_or_else(|| Error::InvalidFormat(raw.to_string()))
    }
}

impl AsRef<str> for OutputFormat {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_value(s)
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.as_str().to_string()
    }
}
