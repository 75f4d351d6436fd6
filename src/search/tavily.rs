use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{SearchError, SearchHit, SearchProvider, check_status, non_empty, retain_web_hits};

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'static str,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    url: Option<String>,
    title: Option<String>,
    content: Option<String>,
}

/// Tavily search API (JSON POST, bearer key).
pub struct TavilyProvider {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl TavilyProvider {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: TAVILY_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchProvider for TavilyProvider {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let request = TavilyRequest {
            query,
            max_results,
            search_depth: "advanced",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let body = check_status(self.name(), response)?.text().await?;

        let hits = parse_tavily_response(&body, max_results)?;
        debug!(provider = self.name(), hits = hits.len(), "Search completed");
        Ok(hits)
    }
}

pub(crate) fn parse_tavily_response(
    body: &str,
    max_results: usize,
) -> Result<Vec<SearchHit>, SearchError> {
    let response: TavilyResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Parse {
            provider: "tavily".to_string(),
            reason: e.to_string(),
        })?;

    let hits = response
        .results
        .into_iter()
        .filter_map(|r| {
            Some(SearchHit {
                url: non_empty(r.url)?,
                title: non_empty(r.title),
                snippet: non_empty(r.content),
            })
        })
        .collect();

    Ok(retain_web_hits(hits, max_results))
}
