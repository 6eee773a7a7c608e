use log::{debug, warn};
use serde_json::Value;

use crate::SearchResponse;
use crate::config::Config;
use crate::detect::{Extraction, extract_continuation, extract_page};
use crate::error::Result;

/// One invocation: a fresh text query, or a continuation of an earlier one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Query(String),
    Continuation { key: String, page_token: String },
}

impl SearchRequest {
    /// A supplied API key selects the continuation path, as the upstream
    /// cursor is only valid against the key it was issued with
    pub fn new(query: Option<String>, key: Option<String>, page_token: Option<String>) -> Self {
        match key {
            Some(key) => SearchRequest::Continuation {
                key,
                page_token: page_token.unwrap_or_default(),
            },
            None => SearchRequest::Query(query.unwrap_or_default()),
        }
    }
}

/// Issues exactly one upstream request per search and assembles the envelope
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    config: Config,
    version: String,
}

impl SearchClient {
    pub fn new(config: Config, version: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), config, version)
    }

    /// Share an existing connection pool
    pub fn with_client(client: reqwest::Client, config: Config, version: impl Into<String>) -> Self {
        Self {
            client,
            config,
            version: version.into(),
        }
    }

    /// Run a search. Never fails: transport errors come back as
    /// `SearchResponse::Failed`, parse trouble as a shorter result list.
    pub async fn search(&self, request: &SearchRequest) -> SearchResponse {
        let outcome = match request {
            SearchRequest::Query(query) => self.fetch_results_page(query).await,
            SearchRequest::Continuation { key, page_token } => self.fetch_continuation(key, page_token).await,
        };

        match outcome {
            Ok(extraction) => extraction.into_envelope(&self.version).into(),
            Err(e) => {
                warn!("Search request failed: {e}");
                SearchResponse::Failed { error: e.to_string() }
            }
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn fetch_results_page(&self, query: &str) -> Result<Extraction> {
        let url = self.endpoint("/results");
        debug!("Fetching results page: {url} q={query:?}");

        let html = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .header("User-Agent", &self.config.user_agent)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(extract_page(&html))
    }

    async fn fetch_continuation(&self, key: &str, page_token: &str) -> Result<Extraction> {
        let url = self.endpoint("/youtubei/v1/search");
        debug!("Fetching continuation: {url}");

        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": self.config.client_name,
                    "clientVersion": self.config.client_version
                }
            },
            "continuation": page_token
        });

        let text = self
            .client
            .post(&url)
            .query(&[("key", key)])
            .header("User-Agent", &self.config.user_agent)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response = serde_json::from_str::<Value>(&text).unwrap_or_else(|e| {
            warn!("Continuation response is not JSON: {e}");
            Value::Null
        });

        Ok(extract_continuation(&response, key))
    }
}
