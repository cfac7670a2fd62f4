//! Search query model.
//!
//! One typed constructor validates every inbound query; the JSON-body and
//! query-string transports are thin adapters over it. Validation happens
//! before any network call.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::url_utils::SEARCH_ENGINE_BASE;

/// Results requested when the client does not say.
pub const DEFAULT_RESULT_COUNT: u32 = 10;

/// Interface language when the client does not say.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Region when the client does not say.
pub const DEFAULT_REGION: &str = "us";

const QUERY_REQUIRED: &str = "query parameter is required and must be a non-empty string";

/// A validated search query. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    text: String,
    result_count: u32,
    language: String,
    region: String,
}

impl SearchQuery {
    /// Build a query with default count, language and region.
    ///
    /// # Examples
    ///
    /// ```
    /// use serp_proxy::SearchQuery;
    ///
    /// let q = SearchQuery::new("  rust programming ").unwrap();
    /// assert_eq!(q.text(), "rust programming");
    /// assert_eq!(q.result_count(), 10);
    /// assert!(SearchQuery::new("   ").is_err());
    /// ```
    pub fn new(text: &str) -> Result<Self> {
        Self::build(text, None, None, None)
    }

    /// Build a query, filling unset parts with their defaults.
    ///
    /// Blank language or region strings count as unset.
    pub fn build(
        text: &str,
        result_count: Option<u32>,
        language: Option<&str>,
        region: Option<&str>,
    ) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::InvalidQuery(QUERY_REQUIRED.to_string()));
        }
        let result_count = result_count.unwrap_or(DEFAULT_RESULT_COUNT);
        if result_count == 0 {
            return Err(Error::InvalidQuery("num must be a positive integer".to_string()));
        }
        Ok(Self {
            text: text.to_string(),
            result_count,
            language: non_blank(language).unwrap_or(DEFAULT_LANGUAGE).to_string(),
            region: non_blank(region).unwrap_or(DEFAULT_REGION).to_string(),
        })
    }

    /// Adapter for the structured-body transport:
    /// `{ "query": string, "num"?: int, "hl"?: string, "gl"?: string }`.
    pub fn from_json_body(body: &Value) -> Result<Self> {
        let text = body
            .get("query")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::InvalidQuery(QUERY_REQUIRED.to_string()))?;

        let result_count = match body.get("num") {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                value
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| Error::InvalidQuery("num must be a positive integer".to_string()))?,
            ),
        };

        let language = optional_str(body, "hl")?;
        let region = optional_str(body, "gl")?;

        Self::build(text, result_count, language, region)
    }

    /// Adapter for the query-string transport (`?query=&num=&hl=&gl=`).
    pub fn from_query_params(params: &HashMap<String, String>) -> Result<Self> {
        let text = params
            .get("query")
            .ok_or_else(|| Error::InvalidQuery(QUERY_REQUIRED.to_string()))?;

        let result_count = match params.get("num").map(|n| n.trim()) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|_| Error::InvalidQuery("num must be a positive integer".to_string()))?,
            ),
        };

        Self::build(
            text,
            result_count,
            params.get("hl").map(String::as_str),
            params.get("gl").map(String::as_str),
        )
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn result_count(&self) -> u32 {
        self.result_count
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The results-page URL the upstream is asked to fetch.
    ///
    /// ```
    /// use serp_proxy::SearchQuery;
    ///
    /// let q = SearchQuery::new("rust programming").unwrap();
    /// assert_eq!(
    ///     q.search_url(),
    ///     "https://www.google.com/search?q=rust+programming&num=10&hl=en&gl=us"
    /// );
    /// ```
    #[must_use]
    pub fn search_url(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("q", &self.text)
            .append_pair("num", &self.result_count.to_string())
            .append_pair("hl", &self.language)
            .append_pair("gl", &self.region)
            .finish();
        format!("{SEARCH_ENGINE_BASE}/search?{query}")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn optional_str<'a>(body: &'a Value, key: &str) -> Result<Option<&'a str>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(Error::InvalidQuery(format!("{key} must be a string"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_applied() {
        let q = SearchQuery::from_json_body(&json!({"query": "rust programming"}));
        match q {
            Ok(q) => {
                assert_eq!(q.text(), "rust programming");
                assert_eq!(q.result_count(), 10);
                assert_eq!(q.language(), "en");
                assert_eq!(q.region(), "us");
            }
            Err(err) => panic!("unexpected error: {err}"),
        }
    }

    #[test]
    fn explicit_parts_kept() {
        let q = SearchQuery::from_json_body(&json!({"query": "rust", "num": 5, "hl": "de", "gl": "at"}));
        assert_eq!(
            q.map(|q| q.search_url()).ok().as_deref(),
            Some("https://www.google.com/search?q=rust&num=5&hl=de&gl=at")
        );
    }

    #[test]
    fn invalid_query_values_rejected() {
        for body in [
            json!({}),
            json!({"query": ""}),
            json!({"query": "   \t"}),
            json!({"query": 42}),
            json!({"query": null}),
            json!({"query": ["rust"]}),
        ] {
            assert!(
                matches!(SearchQuery::from_json_body(&body), Err(Error::InvalidQuery(_))),
                "accepted {body}"
            );
        }
    }

    #[test]
    fn invalid_num_rejected() {
        for num in [json!(0), json!(-3), json!(2.5), json!("ten")] {
            let body = json!({"query": "rust", "num": num});
            assert!(SearchQuery::from_json_body(&body).is_err(), "accepted num {num}");
        }
        assert!(SearchQuery::from_json_body(&json!({"query": "rust", "hl": 1})).is_err());
    }

    #[test]
    fn query_params_adapter() {
        let mut params = HashMap::new();
        params.insert("query".to_string(), "c++ & rust".to_string());
        params.insert("num".to_string(), "3".to_string());
        params.insert("gl".to_string(), String::new());

        match SearchQuery::from_query_params(&params) {
            Ok(q) => {
                assert_eq!(q.result_count(), 3);
                assert_eq!(q.region(), "us");
                assert_eq!(
                    q.search_url(),
                    "https://www.google.com/search?q=c%2B%2B+%26+rust&num=3&hl=en&gl=us"
                );
            }
            Err(err) => panic!("unexpected error: {err}"),
        }

        params.insert("num".to_string(), "abc".to_string());
        assert!(SearchQuery::from_query_params(&params).is_err());
        assert!(SearchQuery::from_query_params(&HashMap::new()).is_err());
    }
}
