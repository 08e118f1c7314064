//! Typed client for a SearXNG instance

use super::models::{RequestOptions, ResolvedOptions, SearchRequest};
use crate::config::SearxngConfig;
use crate::error::{Error, Result};
use crate::network::{ApiRequest, Endpoint, HttpClient};
use crate::plugins::{PluginInfo, PluginSelection, PluginStatus};
use crate::results::SearchResponse;
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

/// Client for the search, config and error statistics endpoints
#[derive(Debug, Clone)]
pub struct SearxngApi {
    config: SearxngConfig,
    http: HttpClient,
}

impl SearxngApi {
    /// Create a client for the instance described by `config`
    pub fn new(config: SearxngConfig) -> Result<Self> {
        let http = HttpClient::new()?;
        debug!(base_url = config.base_url(), "API client initialized");
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &SearxngConfig {
        &self.config
    }

    /// Default timeout in seconds
    pub fn timeout(&self) -> f64 {
        self.config.timeout()
    }

    /// Change the default timeout; negative values are rejected
    pub fn set_timeout(&mut self, timeout: f64) -> Result<()> {
        self.config.set_timeout(timeout)
    }

    /// Paths of all endpoints, sorted
    pub fn endpoints() -> Vec<&'static str> {
        Endpoint::list_valid()
    }

    /// URL of `endpoint` on `base_url`, or on the configured base URL
    pub fn format_url(&self, endpoint: impl AsRef<str>, base_url: Option<&str>) -> Result<String> {
        let endpoint = Endpoint::from_value(endpoint)?;
        let base_url = base_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.config.base_url());
        Ok(endpoint.resolve(base_url))
    }

    /// Fetch the server's `/config` document
    pub async fn get_server_config(&self, options: &RequestOptions) -> Result<Value> {
        let resolved = options.resolve(&self.config);
        self.http.execute(self.get(Endpoint::Config, resolved)).await
    }

    /// Names of the server's plugins, selected by `status`
    pub async fn get_server_plugins(
        &self,
        status: PluginStatus,
        options: &RequestOptions,
    ) -> Result<PluginSelection> {
        let config = self.get_server_config(options).await?;
        let plugins: Vec<PluginInfo> = serde_json::from_value(required(&config, "plugins")?)?;
        debug!("Server reports {} plugins", plugins.len());
        Ok(PluginSelection::select(&plugins, status))
    }

    /// Category names as reported by the server
    pub async fn get_server_categories(&self, options: &RequestOptions) -> Result<Vec<String>> {
        let config = self.get_server_config(options).await?;
        Ok(serde_json::from_value(required(&config, "categories")?)?)
    }

    /// Fail if any of `categories` is unknown.
    ///
    /// Without `valid_categories`, the set is fetched from the server with
    /// spaces in names replaced by underscores. An empty `categories` is
    /// always accepted without contacting the server.
    pub async fn check_categories<S: AsRef<str>>(
        &self,
        categories: &[S],
        valid_categories: Option<&HashSet<String>>,
    ) -> Result<()> {
        if categories.is_empty() {
            return Ok(());
        }
        match valid_categories {
            Some(valid) => ensure_known(categories, valid),
            None => {
                let valid = self.valid_categories(&RequestOptions::default()).await?;
                ensure_known(categories, &valid)
            }
        }
    }

    /// Fetch the server's `/stats/errors` document
    pub async fn get_server_error_stats(&self, options: &RequestOptions) -> Result<Value> {
        let resolved = options.resolve(&self.config);
        self.http
            .execute(self.get(Endpoint::ErrorStats, resolved))
            .await
    }

    /// Run a search and normalize the response.
    ///
    /// Requested categories are validated first; an invalid one aborts
    /// the call before the search request is sent.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let resolved = request.options.resolve(&self.config);

        if !request.categories.is_empty() {
            let valid = self.valid_categories(&resolved.into()).await?;
            ensure_known(&request.categories, &valid)?;
        }

        let url = Endpoint::Search.resolve(self.config.base_url());
        info!("Executing search '{}' against {}", request.query, url);

        let mut api_request = ApiRequest::post(url)
            .timeout(resolved.timeout)
            .verify_ssl(resolved.verify_ssl);
        for (key, value) in request.form_fields(resolved.format) {
            api_request = api_request.field(key, value);
        }

        let raw = self.http.execute(api_request).await?;
        let response = SearchResponse::from_raw(request.query.as_str(), &raw)?;
        debug!("Search returned {} results", response.number_of_results);
        Ok(response)
    }

    /// Server categories, normalized for comparison
    async fn valid_categories(&self, options: &RequestOptions) -> Result<HashSet<String>> {
        Ok(self
            .get_server_categories(options)
            .await?
            .into_iter()
            .map(|c| c.replace(' ', "_"))
            .collect())
    }

    fn get(&self, endpoint: Endpoint, resolved: ResolvedOptions) -> ApiRequest {
        ApiRequest::get(endpoint.resolve(self.config.base_url()))
            .param("format", resolved.format.as_str())
            .timeout(resolved.timeout)
            .verify_ssl(resolved.verify_ssl)
    }
}

/// Look up a key of a response object
fn required(document: &Value, key: &str) -> Result<Value> {
    document
        .get(key)
        .cloned()
        .ok_or_else(|| Error::MissingField(key.to_string()))
}

fn ensure_known<S: AsRef<str>>(categories: &[S], valid: &HashSet<String>) -> Result<()> {
    let invalid: BTreeSet<&str> = categories
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| !valid.contains(*c))
        .collect();
    if invalid.is_empty() {
        return Ok(());
    }
    Err(Error::InvalidCategories(
        invalid.into_iter().map(str::to_string).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn server_config() -> Value {
        json!({
            "categories": ["general", "news", "social media", "it"],
            "plugins": [
                {"name": "A", "enabled": true},
                {"name": "B", "enabled": false}
            ],
            "instance_name": "SearXNG"
        })
    }

    fn hit(url: &str, score: f64) -> Value {
        json!({
            "url": url,
            "title": format!("Title {}", url),
            "content": "snippet",
            "engine": "duckduckgo",
            "parsed_url": ["https", url, "/", "", "", ""],
            "template": "default.html",
            "positions": [1],
            "score": score,
            "category": "general"
        })
    }

    async fn api_for(server: &MockServer) -> SearxngApi {
        let config = SearxngConfig::default().with_base_url(Some(server.uri().as_str()));
        SearxngApi::new(config).unwrap()
    }

    async fn mount_config(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(server_config()))
            .mount(server)
            .await;
    }

    fn valid(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(
            SearxngApi::endpoints(),
            vec!["/config", "/search", "/stats/errors"]
        );
    }

    #[test]
    fn test_format_url() {
        let api = SearxngApi::new(SearxngConfig::default()).unwrap();
        assert_eq!(
            api.format_url("SEARCH", None).unwrap(),
            "http://localhost/search"
        );
        assert_eq!(
            api.format_url(Endpoint::ErrorStats, Some("https://searx.example.org/"))
                .unwrap(),
            "https://searx.example.org/stats/errors"
        );
        assert!(api.format_url("/nope", None).unwrap_err().is_value_error());
    }

    #[test]
    fn test_set_timeout() {
        let mut api = SearxngApi::new(SearxngConfig::default()).unwrap();
        api.set_timeout(4.0).unwrap();
        assert_eq!(api.timeout(), 4.0);
        assert!(api.set_timeout(-0.5).is_err());
        assert_eq!(api.config().timeout(), 4.0);
    }

    #[tokio::test]
    async fn test_get_server_config_sends_format() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/config"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(server_config()))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server).await;
        let config = api
            .get_server_config(&RequestOptions::new().with_format("not-a-format"))
            .await
            .unwrap();
        assert_eq!(config["instance_name"], json!("SearXNG"));
    }

    #[tokio::test]
    async fn test_get_server_plugins() {
        let server = MockServer::start().await;
        mount_config(&server).await;
        let api = api_for(&server).await;
        let options = RequestOptions::new();

        let enabled = api
            .get_server_plugins(PluginStatus::Enabled, &options)
            .await
            .unwrap();
        assert_eq!(enabled, PluginSelection::Only(vec!["A".to_string()]));

        let all = api
            .get_server_plugins(PluginStatus::All, &options)
            .await
            .unwrap();
        assert_eq!(
            all,
            PluginSelection::Both {
                disabled: vec!["B".to_string()],
                enabled: vec!["A".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn test_get_server_categories() {
        let server = MockServer::start().await;
        mount_config(&server).await;
        let api = api_for(&server).await;

        let categories = api
            .get_server_categories(&RequestOptions::new())
            .await
            .unwrap();
        assert_eq!(categories, vec!["general", "news", "social media", "it"]);
    }

    #[tokio::test]
    async fn test_missing_categories_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plugins": []})))
            .mount(&server)
            .await;
        let api = api_for(&server).await;

        let err = api
            .get_server_categories(&RequestOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingField(ref key) if key == "categories"));
    }

    #[tokio::test]
    async fn test_check_categories_with_explicit_set() {
        let api = SearxngApi::new(SearxngConfig::default()).unwrap();
        let known = valid(&["general", "news"]);

        api.check_categories(&["news"], Some(&known)).await.unwrap();

        let err = api
            .check_categories(&["bogus", "news", "aardvark"], Some(&known))
            .await
            .unwrap_err();
        assert!(err.is_value_error());
        assert_eq!(
            err.to_string(),
            "The following categories are invalid: aardvark, bogus"
        );
    }

    #[tokio::test]
    async fn test_check_categories_empty_is_noop() {
        // no server is running on the default base URL; nothing may be fetched
        let api = SearxngApi::new(SearxngConfig::default()).unwrap();
        let none: [&str; 0] = [];
        api.check_categories(&none, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_check_categories_fetches_and_normalizes() {
        let server = MockServer::start().await;
        mount_config(&server).await;
        let api = api_for(&server).await;

        api.check_categories(&["social_media", "it"], None)
            .await
            .unwrap();
        let err = api
            .check_categories(&["social media"], None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCategories(ref names) if names == &["social media"]));
    }

    #[tokio::test]
    async fn test_get_server_error_stats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats/errors"))
            .and(query_param("format", "json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"google": [{"exception_classname": "TimeoutError"}]})),
            )
            .mount(&server)
            .await;
        let api = api_for(&server).await;

        let stats = api
            .get_server_error_stats(&RequestOptions::new())
            .await
            .unwrap();
        assert!(stats.get("google").is_some());
    }

    #[tokio::test]
    async fn test_http_errors_propagate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;
        let api = api_for(&server).await;
        let options = RequestOptions::new();

        let err = api.get_server_config(&options).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        let err = api.get_server_error_stats(&options).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        let err = api.search(&SearchRequest::new("rust")).await.unwrap_err();
        assert_eq!(err.status(), Some(429));
    }

    #[tokio::test]
    async fn test_search_normalizes_results() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_string_contains("q=rust"))
            .and(body_string_contains("format=json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "rust",
                "number_of_results": 0,
                "results": [hit("a", 0.5), hit("b", 0.2), hit("c", 0.9)],
                "unresponsive_engines": [["bing", "timeout"]]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let api = api_for(&server).await;

        let response = api.search(&SearchRequest::new("rust")).await.unwrap();
        assert_eq!(response.query, "rust");
        assert_eq!(response.number_of_results, 3);
        let urls: Vec<&str> = response.results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["b", "a", "c"]);
        assert_eq!(response.results[0].engine, vec!["duckduckgo"]);
        assert_eq!(response.unresponsive_engines, json!([["bing", "timeout"]]));

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["results"][0]["score"], json!(0.2));
    }

    #[tokio::test]
    async fn test_search_with_categories_and_engines() {
        let server = MockServer::start().await;
        mount_config(&server).await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_string_contains("categories=social_media%2Cit"))
            .and(body_string_contains("engines=github"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [],
                "unresponsive_engines": []
            })))
            .expect(1)
            .mount(&server)
            .await;
        let api = api_for(&server).await;

        let request = SearchRequest::new("rust")
            .with_categories(["social_media", "it"])
            .with_engine("github");
        let response = api.search(&request).await.unwrap();
        assert!(response.results.is_empty());
    }

    #[tokio::test]
    async fn test_search_rejects_unknown_category_before_sending() {
        let server = MockServer::start().await;
        mount_config(&server).await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let api = api_for(&server).await;

        let request = SearchRequest::new("rust").with_category("bogus");
        let err = api.search(&request).await.unwrap_err();
        assert!(err.is_value_error());
        assert!(err.to_string().contains("bogus"));
    }
}
