use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{Result, SearchError};

/// Trimmed, non-empty search text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    pub fn parse(raw: &str) -> Result<Query> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SearchError::InvalidInput);
        }
        Ok(Query(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub description: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
    ) -> SearchResult {
        SearchResult {
            title: title.into(),
            link: link.into(),
            description: description.into(),
        }
    }
}

/// Body returned by the search endpoint. A missing or `null`
/// `search_results` field reads as no results.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub search_results: Vec<SearchResult>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<SearchResult>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<SearchResult>>::deserialize(deserializer)?.unwrap_or_default())
}
