use std::path::PathBuf;

use crate::constants::{DEFAULT_EMBEDDER_MAX_SEQ_LEN, DEFAULT_EMBEDDING_DIM};
use crate::embedding::error::EmbeddingError;

/// Configuration for [`SentenceEmbedder`](super::SentenceEmbedder).
#[derive(Debug, Clone)]
pub struct EmbedderConfig {
    /// Model directory; `None` selects the stub backend.
    pub model_path: Option<PathBuf>,
    /// Tokens kept per input (longer inputs are truncated).
    pub max_seq_len: usize,
    /// Vector size produced by the stub backend.
    pub stub_dimension: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: DEFAULT_EMBEDDER_MAX_SEQ_LEN,
            stub_dimension: DEFAULT_EMBEDDING_DIM,
        }
    }
}

impl EmbedderConfig {
    pub const ENV_MODEL_PATH: &'static str = "VERIFACT_EMBEDDER_PATH";

    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    /// Deterministic bag-of-words vectors, no model files needed.
    pub fn stub() -> Self {
        Self::default()
    }

    /// Model directory if given, stub otherwise.
    pub fn from_path(model_path: Option<PathBuf>) -> Self {
        match model_path {
            Some(path) => Self::new(path),
            None => Self::stub(),
        }
    }

    pub fn from_env() -> Self {
        let model_path = std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self::from_path(model_path)
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }

        if self.stub_dimension == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "stub_dimension must be greater than zero".to_string(),
            });
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_path cannot be empty when provided".to_string(),
            });
        }

        Ok(())
    }

    pub fn is_stub(&self) -> bool {
        self.model_path.is_none()
    }
}
