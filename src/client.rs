use std::future::Future;

use crate::config::Config;
use crate::data_models::{Query, SearchResponse, SearchResult};
use crate::error::{Result, SearchError};

/// Performs one search request. An empty vector means "no results".
pub trait SearchClient: Send + Sync {
    fn search(&self, query: &Query) -> impl Future<Output = Result<Vec<SearchResult>>> + Send;
}

/// `GET <endpoint>?search=<query>` over reqwest.
pub struct HttpSearchClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSearchClient {
    pub fn new(endpoint: impl Into<String>) -> Result<HttpSearchClient> {
        Self::with_client(reqwest::Client::builder().build()?, endpoint)
    }

    pub fn from_config(config: &Config) -> Result<HttpSearchClient> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(builder.build()?, config.search_endpoint.clone())
    }

    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
    ) -> Result<HttpSearchClient> {
        let endpoint = endpoint.into();
        if reqwest::Url::parse(&endpoint).is_err() {
            return Err(SearchError::Config {
                key: "SEARCH_ENDPOINT",
                value: endpoint,
            });
        }
        Ok(HttpSearchClient { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SearchClient for HttpSearchClient {
    async fn search(&self, query: &Query) -> Result<Vec<SearchResult>> {
        tracing::debug!(query = %query, endpoint = %self.endpoint, "performing search");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("search", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&body)?;

        tracing::debug!(
            query = %query,
            results = parsed.search_results.len(),
            "search completed"
        );
        Ok(parsed.search_results)
    }
}
