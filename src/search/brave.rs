use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{SearchError, SearchHit, SearchProvider, check_status, non_empty, retain_web_hits};

const BRAVE_ENDPOINT: &str = "https://api.search.brave.com/res/v1/web/search";

#[derive(Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Deserialize)]
struct BraveResult {
    url: Option<String>,
    title: Option<String>,
    description: Option<String>,
}

/// Brave Search API (JSON GET, `X-Subscription-Token`).
pub struct BraveProvider {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl BraveProvider {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: BRAVE_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchProvider for BraveProvider {
    fn name(&self) -> &str {
        "brave"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let count = max_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .header("X-Subscription-Token", &self.api_key)
            .query(&[("q", query), ("count", count.as_str())])
            .send()
            .await?;
        let body = check_status(self.name(), response)?.text().await?;

        let hits = parse_brave_response(&body, max_results)?;
        debug!(provider = self.name(), hits = hits.len(), "Search completed");
        Ok(hits)
    }
}

pub(crate) fn parse_brave_response(
    body: &str,
    max_results: usize,
) -> Result<Vec<SearchHit>, SearchError> {
    let response: BraveResponse = serde_json::from_str(body).map_err(|e| SearchError::Parse {
        provider: "brave".to_string(),
        reason: e.to_string(),
    })?;

    let hits = response
        .web
        .map(|web| web.results)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|r| {
            Some(SearchHit {
                url: non_empty(r.url)?,
                title: non_empty(r.title),
                snippet: non_empty(r.description),
            })
        })
        .collect();

    Ok(retain_web_hits(hits, max_results))
}
