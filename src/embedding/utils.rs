use std::path::Path;

use candle_core::{Device, Tensor};
use tokenizers::{Encoding, PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use super::error::EmbeddingError;

/// Files every model directory must contain.
pub const MODEL_FILES: [&str; 3] = ["config.json", "model.safetensors", "tokenizer.json"];

/// Checks that `model_dir` holds a loadable HuggingFace-style model.
pub fn check_model_dir(model_dir: &Path) -> Result<(), EmbeddingError> {
    if !model_dir.is_dir() {
        return Err(EmbeddingError::ModelNotFound {
            path: model_dir.to_path_buf(),
        });
    }

    for file in MODEL_FILES {
        if !model_dir.join(file).exists() {
            return Err(EmbeddingError::ModelLoadFailed {
                reason: format!("missing {file} in {}", model_dir.display()),
            });
        }
    }

    Ok(())
}

/// Loads `tokenizer.json` with truncation at `max_len` and batch-longest padding.
pub fn load_tokenizer(model_dir: &Path, max_len: usize) -> Result<Tokenizer, EmbeddingError> {
    let path = model_dir.join("tokenizer.json");
    let mut tokenizer =
        Tokenizer::from_file(&path).map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("failed to load {}: {e}", path.display()),
        })?;

    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: max_len,
            ..Default::default()
        }))
        .map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("failed to configure truncation: {e}"),
        })?;

    // keep the pad token from tokenizer.json when it defines one
    let padding = match tokenizer.get_padding() {
        Some(existing) => PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..existing.clone()
        },
        None => PaddingParams::default(),
    };
    tokenizer.with_padding(Some(padding));

    Ok(tokenizer)
}

/// Token tensors for one padded batch, each shaped `[batch, seq_len]`.
pub struct EncodedBatch {
    pub input_ids: Tensor,
    pub token_type_ids: Tensor,
    pub attention_mask: Tensor,
}

impl EncodedBatch {
    pub fn from_encodings(encodings: &[Encoding], device: &Device) -> candle_core::Result<Self> {
        let stack = |field: fn(&Encoding) -> &[u32]| -> candle_core::Result<Tensor> {
            let rows = encodings
                .iter()
                .map(|encoding| Tensor::new(field(encoding), device))
                .collect::<candle_core::Result<Vec<_>>>()?;
            Tensor::stack(&rows, 0)
        };

        Ok(Self {
            input_ids: stack(Encoding::get_ids)?,
            token_type_ids: stack(Encoding::get_type_ids)?,
            attention_mask: stack(Encoding::get_attention_mask)?,
        })
    }
}
