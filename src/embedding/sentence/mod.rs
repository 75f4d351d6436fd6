//! Sentence embedder (BERT + mean pooling).
//!
//! Use [`EmbedderConfig::stub`] for tests and offline runs without model files.
//! The stub hashes content words into a fixed-size bag-of-words vector, so
//! texts that share vocabulary still get a meaningful cosine similarity.

pub mod config;


pub use config::EmbedderConfig;

use candle_core::Device;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use super::bert::BertEncoder;
use super::device::select_device;
use super::error::EmbeddingError;
use super::utils::{EncodedBatch, check_model_dir, load_tokenizer};
use super::{TextEmbedder, l2_normalize};
use crate::hashing::hash_to_u64;
use crate::text::content_words;

enum EmbedderBackend {
    Model {
        encoder: BertEncoder,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// [`TextEmbedder`] backed by a sentence-transformers BERT model.
pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
    dimension: usize,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({device:?})"),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("dimension", &self.dimension)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let Some(model_path) = config.model_path.clone() else {
            warn!("Sentence embedder running in STUB mode");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                dimension: config.stub_dimension,
                config,
            });
        };

        check_model_dir(&model_path)?;

        let device = select_device();
        debug!(?device, "Selected compute device for sentence embedder");

        let encoder = BertEncoder::load(&model_path, &device)?;
        let tokenizer = load_tokenizer(&model_path, config.max_seq_len)?;
        let dimension = encoder.hidden_size();

        info!(
            model_path = %model_path.display(),
            dimension,
            max_seq_len = config.max_seq_len,
            "Sentence embedder loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            },
            config,
            dimension,
        })
    }

    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(EmbedderConfig::stub())
    }

    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    fn embed_with_model(
        &self,
        texts: &[&str],
        encoder: &BertEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let encodings = tokenizer.encode_batch(texts.to_vec(), true).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        debug!(
            batch = texts.len(),
            seq_len = encodings.first().map(|e| e.len()).unwrap_or(0),
            "Embedding batch"
        );

        let batch = EncodedBatch::from_encodings(&encodings, device)?;
        let vectors = encoder.embed(&batch)?.to_vec2::<f32>()?;

        Ok(vectors)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for word in content_words(text) {
            let bucket = (hash_to_u64(word.as_bytes()) % self.dimension as u64) as usize;
            vector[bucket] += 1.0;
        }

        l2_normalize(&mut vector);
        vector
    }
}

impl TextEmbedder for SentenceEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => self
                .embed_with_model(&[text], encoder, tokenizer, device)?
                .pop()
                .ok_or_else(|| EmbeddingError::InferenceFailed {
                    reason: "encoder returned no vector".to_string(),
                }),
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        match &self.backend {
            EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => self.embed_with_model(texts, encoder, tokenizer, device),
            EmbedderBackend::Stub => Ok(texts.iter().map(|text| self.embed_stub(text)).collect()),
        }
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
