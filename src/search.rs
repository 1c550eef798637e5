use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::data_models::RawResult;

const SERPER_URL: &str = "https://google.serper.dev/search";
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("search provider unavailable: {0}")]
    Unavailable(String),
}

/// A keyword web-search backend returning ranked (title, link, snippet) hits.
#[allow(async_fn_in_trait)]
pub trait SearchProvider {
    async fn search(&self, query: &str, num_results: usize)
    -> Result<Vec<RawResult>, SearchError>;
}

#[derive(Deserialize, Default)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<RawResult>,
}

pub struct SerperClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl SerperClient {
    pub fn new(api_key: Option<String>) -> SerperClient {
        if api_key.is_none() {
            log::warn!("SERPER_API_KEY not set, every search will return empty results");
        }
        SerperClient {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

impl SearchProvider for SerperClient {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<RawResult>, SearchError> {
        // degraded mode: no credential means no results, never an error
        let Some(api_key) = &self.api_key else {
            return Ok(Vec::new());
        };

        let res = self
            .client
            .post(SERPER_URL)
            .header("X-API-KEY", api_key)
            .json(&json!({ "q": query, "num": num_results }))
            .timeout(SEARCH_TIMEOUT)
            .send()
            .await?;

        let data: SerperResponse = res.json().await?;
        Ok(data.organic)
    }
}
