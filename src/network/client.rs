//! HTTP client for making requests to a SearXNG instance

use crate::error::{json_kind, Error, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// One request against the API
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Query parameters
    pub params: Vec<(String, String)>,
    /// Form body fields (POST only)
    pub form: Vec<(String, String)>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Verify TLS certificates
    pub verify_ssl: bool,
}

impl ApiRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Get)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url, HttpMethod::Post)
    }

    fn new(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            params: Vec::new(),
            form: Vec::new(),
            timeout: Duration::from_secs(30),
            verify_ssl: true,
        }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add a form field
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set TLS verification
    pub fn verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }
}

/// HTTP client wrapper with one connection pool per TLS verification mode
#[derive(Debug, Clone)]
pub struct HttpClient {
    verified: Client,
    unverified: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let user_agent = format!("searxng-cli/{}", crate::VERSION);

        let verified = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .brotli(true)
            .build()?;

        let unverified = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .brotli(true)
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self {
            verified,
            unverified,
        })
    }

    /// Execute a request and decode its body as a JSON object or array
    pub async fn execute(&self, request: ApiRequest) -> Result<serde_json::Value> {
        let client = if request.verify_ssl {
            &self.verified
        } else {
            &self.unverified
        };

        let mut req_builder = match request.method {
            HttpMethod::Get => client.get(&request.url),
            HttpMethod::Post => client.post(&request.url),
        };

        req_builder = req_builder
            .timeout(request.timeout)
            .header("Accept", "application/json");

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        if request.method == HttpMethod::Post {
            req_builder = req_builder.form(&request.form);
        }

        debug!(
            method = ?request.method,
            url = %request.url,
            timeout = ?request.timeout,
            verify_ssl = request.verify_ssl,
            "sending request"
        );

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Check the status and decode the body
    async fn parse_response(response: Response) -> Result<serde_json::Value> {
        let status = response.status();
        let url = response.url().to_string();

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url,
            });
        }

        let text = response.text().await?;
        debug!(%url, status = status.as_u16(), bytes = text.len(), "received response");

        let value: serde_json::Value = serde_json::from_str(&text)?;
        if !(value.is_object() || value.is_array()) {
            return Err(Error::UnexpectedResponse {
                url,
                found: json_kind(&value),
            });
        }
        Ok(value)
    }
}
