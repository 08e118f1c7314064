//! Result type definitions

use crate::error::{json_kind, Error, Result};
use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::str::FromStr;

/// A single search hit, normalized from the server's raw record
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The URL of the result
    pub url: String,
    /// Page title (`title` on the wire)
    pub page_title: String,
    /// Content snippet (`content` on the wire)
    pub summary: String,
    /// Engines that returned this result
    pub engine: Vec<String>,
    /// Components of the parsed URL
    pub parsed_url: Vec<String>,
    /// Template the server would render it with
    pub template: String,
    /// Positions in each engine's results
    pub positions: Vec<i64>,
    /// Relevance score, kept exact
    pub score: BigDecimal,
    /// Categories of the result
    pub category: Vec<String>,
}

impl SearchResult {
    /// Build a result from one entry of a response's `results` array.
    ///
    /// Every key is required. `engine`, `parsed_url`, `positions` and
    /// `category` may be scalars, which become one-element lists.
    pub fn from_raw(raw: &Value) -> Result<Self> {
        let raw = raw
            .as_object()
            .ok_or_else(|| Error::type_error("object", json_kind(raw)))?;

        Ok(Self {
            url: string_field(raw, "url")?,
            page_title: string_field(raw, "title")?,
            summary: string_field(raw, "content")?,
            engine: list_field(raw, "engine", as_string)?,
            parsed_url: list_field(raw, "parsed_url", as_string)?,
            template: string_field(raw, "template")?,
            positions: list_field(raw, "positions", as_integer)?,
            score: parse_score(field(raw, "score")?)?,
            category: list_field(raw, "category", as_string)?,
        })
    }

    /// Plain mapping of the record, with `score` as a float
    pub fn as_json(&self) -> Value {
        json!({
            "url": self.url,
            "page_title": self.page_title,
            "summary": self.summary,
            "engine": self.engine,
            "parsed_url": self.parsed_url,
            "template": self.template,
            "positions": self.positions,
            "score": self.score_f64(),
            "category": self.category,
        })
    }

    /// Score approximated as a float, for output only
    pub fn score_f64(&self) -> f64 {
        self.score.to_f64().unwrap_or(f64::INFINITY)
    }
}

impl Serialize for SearchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.as_json().serialize(serializer)
    }
}

fn field<'a>(raw: &'a Map<String, Value>, key: &str) -> Result<&'a Value> {
    raw.get(key)
        .ok_or_else(|| Error::MissingField(key.to_string()))
}

fn string_field(raw: &Map<String, Value>, key: &str) -> Result<String> {
    as_string(field(raw, key)?)
}

/// Read a field that may hold either one item or a list of them
fn list_field<T>(
    raw: &Map<String, Value>,
    key: &str,
    convert: fn(&Value) -> Result<T>,
) -> Result<Vec<T>> {
    match field(raw, key)? {
        Value::Array(items) => items.iter().map(convert).collect(),
        scalar => Ok(vec![convert(scalar)?]),
    }
}

fn as_string(value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::type_error("str", json_kind(value)))
}

fn as_integer(value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| Error::type_error("int", json_kind(value)))
}

/// Parse from the textual form so no binary rounding creeps in
fn parse_score(value: &Value) -> Result<BigDecimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(Error::type_error("decimal", json_kind(other))),
    };
    BigDecimal::from_str(&text).map_err(|_| Error::InvalidScore(text))
}
