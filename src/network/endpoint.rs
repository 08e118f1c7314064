//! Server routes called by the client

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the fixed routes of a SearXNG instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Search,
    Config,
    ErrorStats,
}

impl Endpoint {
    /// All members, in declaration order
    pub const ALL: [Endpoint; 3] = [Endpoint::Search, Endpoint::Config, Endpoint::ErrorStats];

    /// URL path of the route
    pub fn path(self) -> &'static str {
        match self {
            Self::Search => "/search",
            Self::Config => "/config",
            Self::ErrorStats => "/stats/errors",
        }
    }

    /// Upper-case member name
    pub fn name(self) -> &'static str {
        match self {
            Self::Search => "SEARCH",
            Self::Config => "CONFIG",
            Self::ErrorStats => "ERROR_STATS",
        }
    }

    /// Canonical paths, sorted
    pub fn list_valid() -> Vec<&'static str> {
        let mut valid: Vec<_> = Self::ALL.iter().map(|e| e.path()).collect();
        valid.sort_unstable();
        valid
    }

    /// Parse a path (any case) or a member name.
    ///
    /// Passing an `Endpoint` returns it unchanged.
    pub fn from_value(value: impl AsRef<str>) -> Result<Self> {
        let raw = value.as_ref();
        let lower = raw.to_lowercase();
        if let Some(endpoint) = Self::ALL.into_iter().find(|e| e.path() == lower) {
            return Ok(endpoint);
        }
        let upper = raw.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|e| e.name() == upper)
            .ok_or_else(|| Error::InvalidEndpoint(raw.to_string()))
    }

    /// Full URL of this route on `base_url`.
    ///
    /// Exactly one trailing slash is stripped from the base.
    pub fn resolve(self, base_url: &str) -> String {
        let base = base_url.strip_suffix('/').unwrap_or(base_url);
        format!("{}{}", base, self.path())
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        self.path()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_value(s)
    }
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}
