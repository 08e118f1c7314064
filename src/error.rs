//! Error type shared by the whole client

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while configuring the client or talking to a server
#[derive(Debug, Error)]
pub enum Error {
    /// A value of the wrong kind was supplied (e.g. a number where a string is expected)
    #[error("'{expected}' required, but '{found}' given")]
    Type {
        expected: &'static str,
        found: String,
    },

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid output format: {0}")]
    InvalidFormat(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("timeout must not be negative, got {0}")]
    NegativeTimeout(f64),

    #[error("timeout out of range, got {0}")]
    InvalidTimeout(f64),

    #[error("Invalid score: {0}")]
    InvalidScore(String),

    /// Requested categories the server does not know about, sorted
    #[error("The following categories are invalid: {}", .0.join(", "))]
    InvalidCategories(Vec<String>),

    /// Non-2xx response from the server
    #[error("HTTP error {status} for url ({url})")]
    Http { status: u16, url: String },

    /// The body was JSON, but not an object or an array
    #[error("unexpected response from {url}: expected a JSON object or array, got {found}")]
    UnexpectedResponse { url: String, found: &'static str },

    /// A key the response must contain is absent
    #[error("missing field '{0}' in server response")]
    MissingField(String),

    #[error("failed to decode JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse settings: {0}")]
    Settings(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a type error from the name of the expected kind and the kind actually seen
    pub fn type_error(expected: &'static str, found: impl Into<String>) -> Self {
        Self::Type {
            expected,
            found: found.into(),
        }
    }

    /// Wrong kind of argument
    pub fn is_type_error(&self) -> bool {
        matches!(self, Self::Type { .. })
    }

    /// Right kind of argument, invalid value
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidEndpoint(_)
                | Self::InvalidFormat(_)
                | Self::InvalidStatus(_)
                | Self::NegativeTimeout(_)
                | Self::InvalidTimeout(_)
                | Self::InvalidScore(_)
                | Self::InvalidCategories(_)
        )
    }

    /// Status code of an HTTP error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Name of a JSON value's kind, for diagnostics
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
