use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("non-text content type '{content_type}'")]
    NonText { content_type: String },

    #[error("document has no extractable text")]
    EmptyContent,
}

impl FetchError {
    /// Worth retrying: rate limits, server errors and connection trouble.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
