//! Client configuration with validating setters

use crate::error::{Error, Result};
use crate::network::OutputFormat;
use serde::Serialize;
use serde_yaml::Value;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Request timeout used when none is configured, in seconds
pub const DEFAULT_TIMEOUT: f64 = 30.0;

/// Connection settings for a SearXNG instance.
///
/// Fields are private; every change goes through a setter that validates
/// before storing, so a `SearxngConfig` is always valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearxngConfig {
    base_url: String,
    output_format: OutputFormat,
    timeout: f64,
    verify_ssl: bool,
}

impl Default for SearxngConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_format: OutputFormat::default(),
            timeout: DEFAULT_TIMEOUT,
            verify_ssl: true,
        }
    }
}

impl SearxngConfig {
    /// Create a configuration, validating every field
    pub fn new(
        base_url: Option<&str>,
        output_format: impl AsRef<str>,
        timeout: f64,
        verify_ssl: bool,
    ) -> Result<Self> {
        let mut config = Self::default();
        config.set_base_url(base_url);
        config.set_output_format(output_format)?;
        config.set_timeout(timeout)?;
        config.set_verify_ssl(verify_ssl);
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Timeout in seconds
    pub fn timeout(&self) -> f64 {
        self.timeout
    }

    /// Timeout as a `Duration`
    pub fn timeout_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout).unwrap_or(Duration::MAX)
    }

    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Set the base URL; an empty or absent value restores the default
    pub fn set_base_url(&mut self, base_url: Option<&str>) {
        self.base_url = match base_url {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => DEFAULT_BASE_URL.to_string(),
        };
    }

    /// Set the default output format from a member or its canonical value
    pub fn set_output_format(&mut self, output_format: impl AsRef<str>) -> Result<()> {
        self.output_format = OutputFormat::from_value(output_format)?;
        Ok(())
    }

    /// Set the timeout in seconds; must be non-negative and fit a `Duration`
    pub fn set_timeout(&mut self, timeout: f64) -> Result<()> {
        self.timeout = validate_timeout(timeout)?;
        Ok(())
    }

    pub fn set_verify_ssl(&mut self, verify_ssl: bool) {
        self.verify_ssl = verify_ssl;
    }

    /// Builder-style [`set_base_url`](Self::set_base_url)
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        self.set_base_url(base_url);
        self
    }

    /// Builder-style [`set_output_format`](Self::set_output_format)
    pub fn with_output_format(mut self, output_format: impl AsRef<str>) -> Result<Self> {
        self.set_output_format(output_format)?;
        Ok(self)
    }

    /// Builder-style [`set_timeout`](Self::set_timeout)
    pub fn with_timeout(mut self, timeout: f64) -> Result<Self> {
        self.set_timeout(timeout)?;
        Ok(self)
    }

    /// Builder-style [`set_verify_ssl`](Self::set_verify_ssl)
    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.set_verify_ssl(verify_ssl);
        self
    }

    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_yaml(&value)
    }

    /// Build from a YAML document.
    ///
    /// All keys are optional. Keys of the wrong YAML type are type errors;
    /// unknown keys are ignored with a warning. An empty document yields
    /// the defaults.
    pub fn from_yaml(value: &Value) -> Result<Self> {
        let mut config = Self::default();
        let mapping = match value {
            Value::Null => return Ok(config),
            Value::Mapping(mapping) => mapping,
            other => return Err(Error::type_error("mapping", yaml_kind(other))),
        };

        for (key, value) in mapping {
            let Some(key) = key.as_str() else {
                warn!("Ignoring non-string settings key: {:?}", key);
                continue;
            };
            match key {
                "base_url" => match value {
                    Value::Null => config.set_base_url(None),
                    Value::String(url) => config.set_base_url(Some(url.as_str())),
                    other => return Err(Error::type_error("str", yaml_kind(other))),
                },
                "output_format" => match value {
                    Value::String(format) => config.set_output_format(format)?,
                    other => {
                        return Err(Error::type_error("'OutputFormat' or 'str'", yaml_kind(other)))
                    }
                },
                "timeout" => match value.as_f64() {
                    Some(timeout) => config.set_timeout(timeout)?,
                    None => return Err(Error::type_error("float", yaml_kind(value))),
                },
                "verify_ssl" => match value {
                    Value::Bool(verify) => config.set_verify_ssl(*verify),
                    other => return Err(Error::type_error("bool", yaml_kind(other))),
                },
                unknown => warn!("Ignoring unknown settings key: {}", unknown),
            }
        }

        Ok(config)
    }

    /// Merge with environment variables (SEARXNG_* prefix)
    pub fn merge_env(&mut self) -> Result<()> {
        self.merge_vars(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value
    fn merge_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SEARXNG_BASE_URL") {
            self.set_base_url(Some(val.as_str()));
        }
        if let Some(val) = lookup("SEARXNG_OUTPUT_FORMAT") {
            self.set_output_format(&val)?;
        }
        if let Some(val) = lookup("SEARXNG_TIMEOUT") {
            match val.trim().parse::<f64>() {
                Ok(timeout) => self.set_timeout(timeout)?,
                Err(_) => warn!("Ignoring unparseable SEARXNG_TIMEOUT: {}", val),
            }
        }
        if let Some(val) = lookup("SEARXNG_VERIFY_SSL") {
            match val.trim().to_lowercase().parse::<bool>() {
                Ok(verify) => self.set_verify_ssl(verify),
                Err(_) => warn!("Ignoring unparseable SEARXNG_VERIFY_SSL: {}", val),
            }
        }
        Ok(())
    }
}

/// A timeout must be representable as a `Duration`
fn validate_timeout(timeout: f64) -> Result<f64> {
    if timeout < 0.0 {
        return Err(Error::NegativeTimeout(timeout));
    }
    Duration::try_from_secs_f64(timeout).map_err(|_| Error::InvalidTimeout(timeout))?;
    Ok(timeout)
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}
