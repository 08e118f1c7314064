//! Request parameters for API calls

use crate::config::SearxngConfig;
use crate::network::OutputFormat;
use std::time::Duration;

/// Per-call overrides of the configured defaults.
///
/// Overrides are lenient: an unparseable format or an invalid timeout is
/// silently replaced by the configured value when resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Output format, as a member or its canonical value
    pub format: Option<String>,
    /// Verify TLS certificates
    pub verify_ssl: Option<bool>,
    /// Timeout in seconds
    pub timeout: Option<f64>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set TLS verification
    pub fn with_verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = Some(verify);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Fill in everything not usable from `config`
    pub fn resolve(&self, config: &SearxngConfig) -> ResolvedOptions {
        let format = self
            .format
            .as_deref()
            .and_then(|f| OutputFormat::from_value(f).ok())
            .unwrap_or_else(|| config.output_format());

        let verify_ssl = self.verify_ssl.unwrap_or_else(|| config.verify_ssl());

        let timeout = self
            .timeout
            .and_then(|t| Duration::try_from_secs_f64(t).ok())
            .unwrap_or_else(|| config.timeout_duration());

        ResolvedOptions {
            format,
            verify_ssl,
            timeout,
        }
    }
}

/// Effective parameters of one call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOptions {
    pub format: OutputFormat,
    pub verify_ssl: bool,
    pub timeout: Duration,
}

impl From<ResolvedOptions> for RequestOptions {
    fn from(resolved: ResolvedOptions) -> Self {
        Self {
            format: Some(resolved.format.into()),
            verify_ssl: Some(resolved.verify_ssl),
            timeout: Some(resolved.timeout.as_secs_f64()),
        }
    }
}

/// A search to run against the server
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    /// The search query string
    pub query: String,
    /// Categories to search; validated against the server before sending
    pub categories: Vec<String>,
    /// Engines to use
    pub engines: Vec<String>,
    /// Per-call overrides
    pub options: RequestOptions,
}

impl SearchRequest {
    /// Create a request for a query string
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Add a category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Add several categories
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(categories.into_iter().map(Into::into));
        self
    }

    /// Add an engine
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engines.push(engine.into());
        self
    }

    /// Add several engines
    pub fn with_engines<I, S>(mut self, engines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.engines.extend(engines.into_iter().map(Into::into));
        self
    }

    /// Set per-call overrides
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Form fields for the POST body, leaving out empty ones
    pub fn form_fields(&self, format: OutputFormat) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        if !self.query.is_empty() {
            fields.push(("q".to_string(), self.query.clone()));
        }
        fields.push(("format".to_string(), format.to_string()));
        if !self.categories.is_empty() {
            fields.push(("categories".to_string(), self.categories.join(",")));
        }
        if !self.engines.is_empty() {
            fields.push(("engines".to_string(), self.engines.join(",")));
        }
        fields
    }
}
