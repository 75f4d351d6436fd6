use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} rate limited the request")]
    RateLimited { provider: String },

    #[error("{provider} returned HTTP {status}")]
    Status { provider: String, status: u16 },

    #[error("{provider} response could not be parsed: {reason}")]
    Parse { provider: String, reason: String },

    #[error("no search provider configured")]
    NoProviders,

    #[error("all search providers failed: {}", format_failures(.failures))]
    AllProvidersFailed { failures: Vec<(String, String)> },
}

impl SearchError {
    /// Upstream pressure rather than a broken request.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SearchError::RateLimited { .. })
    }
}

fn format_failures(failures: &[(String, String)]) -> String {
    failures
        .iter()
        .map(|(provider, reason)| format!("{provider}: {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}
