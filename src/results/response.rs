//! Normalized search response

use super::types::SearchResult;
use crate::error::{json_kind, Error, Result};
use serde::Serialize;
use serde_json::Value;

/// A search response reduced to its results, ordered by score
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// The query that was sent
    pub query: String,
    /// Number of entries in `results`
    pub number_of_results: usize,
    /// Results, ascending by score
    pub results: Vec<SearchResult>,
    /// Passed through from the server untouched
    pub unresponsive_engines: Value,
}

impl SearchResponse {
    /// Normalize a raw `/search` body.
    ///
    /// Results are sorted ascending by score; ties keep server order.
    pub fn from_raw(query: impl Into<String>, raw: &Value) -> Result<Self> {
        let raw_results = raw
            .get("results")
            .ok_or_else(|| Error::MissingField("results".to_string()))?;
        let raw_results = raw_results
            .as_array()
            .ok_or_else(|| Error::type_error("array", json_kind(raw_results)))?;

        let mut results = raw_results
            .iter()
            .map(SearchResult::from_raw)
            .collect::<Result<Vec<_>>>()?;
        results.sort_by(|a, b| a.score.cmp(&b.score));

        let unresponsive_engines = raw
            .get("unresponsive_engines")
            .cloned()
            .ok_or_else(|| Error::MissingField("unresponsive_engines".to_string()))?;

        Ok(Self {
            query: query.into(),
            number_of_results: results.len(),
            results,
            unresponsive_engines,
        })
    }
}
