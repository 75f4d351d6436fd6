use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredibilityError {
    #[error("failed to read credibility table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed credibility table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("credibility weight for '{domain}' must be positive and finite, got {weight}")]
    InvalidWeight { domain: String, weight: f64 },

    #[error("invalid domain in credibility table: '{domain}'")]
    InvalidDomain { domain: String },
}
