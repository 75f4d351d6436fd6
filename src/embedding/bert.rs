use std::path::Path;

use candle_core::{DType, Device, IndexOp, Result, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};

use super::error::EmbeddingError;
use super::utils::EncodedBatch;

fn read_config(model_dir: &Path) -> std::result::Result<(Config, serde_json::Value), EmbeddingError> {
    let raw = std::fs::read_to_string(model_dir.join("config.json"))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("failed to parse config.json: {e}"),
        })?;
    check_model_type(&value)?;

    let config: Config =
        serde_json::from_value(value.clone()).map_err(|e| EmbeddingError::ModelLoadFailed {
            reason: format!("failed to parse config.json: {e}"),
        })?;
    Ok((config, value))
}

/// Only BERT position numbering is implemented; RoBERTa-family checkpoints
/// offset positions by `padding_idx + 1` and would load with shifted embeddings.
fn check_model_type(raw: &serde_json::Value) -> std::result::Result<(), EmbeddingError> {
    match raw.get("model_type").and_then(|v| v.as_str()) {
        None | Some("bert") => Ok(()),
        Some(other) => Err(EmbeddingError::InvalidConfig {
            reason: format!("unsupported model_type '{other}', expected a BERT checkpoint"),
        }),
    }
}

fn load_weights<'a>(
    model_dir: &Path,
    device: &Device,
) -> std::result::Result<VarBuilder<'a>, EmbeddingError> {
    let weights = model_dir.join("model.safetensors");
    // SAFETY: the weights file is not modified while mapped.
    let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, device)? };
    Ok(vb)
}

/// Root of the transformer weights: `bert.` or unprefixed
/// (sentence-transformers exports).
fn backbone<'a>(vb: &VarBuilder<'a>) -> VarBuilder<'a> {
    if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
        return vb.pp("bert");
    }
    vb.clone()
}

/// BERT encoder producing mean-pooled, L2-normalised sentence vectors.
pub struct BertEncoder {
    model: BertModel,
    hidden_size: usize,
}

impl BertEncoder {
    pub fn load(model_dir: &Path, device: &Device) -> std::result::Result<Self, EmbeddingError> {
        let (config, _) = read_config(model_dir)?;
        let vb = load_weights(model_dir, device)?;

        let model = BertModel::load(backbone(&vb), &config).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("failed to load BERT encoder: {e}"),
            }
        })?;

        Ok(Self {
            model,
            hidden_size: config.hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Returns `[batch, hidden_size]` unit vectors.
    pub fn embed(&self, batch: &EncodedBatch) -> Result<Tensor> {
        let hidden = self.model.forward(
            &batch.input_ids,
            &batch.token_type_ids,
            Some(&batch.attention_mask),
        )?;

        // mean over real tokens only
        let mask = batch.attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
        let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.maximum(1e-9)?;
        let pooled = summed.broadcast_div(&counts)?;

        let norm = pooled.sqr()?.sum_keepdim(1)?.sqrt()?.maximum(1e-12)?;
        pooled.broadcast_div(&norm)
    }
}

/// BERT sequence-pair classifier (e.g. an NLI cross-encoder).
///
/// Head: `bert.pooler.dense` + tanh, then `classifier`.
pub struct BertSequenceClassifier {
    bert: BertModel,
    pooler: Linear,
    classifier: Linear,
    labels: Vec<String>,
}

impl BertSequenceClassifier {
    pub fn load(model_dir: &Path, device: &Device) -> std::result::Result<Self, EmbeddingError> {
        let (config, raw) = read_config(model_dir)?;
        let labels = parse_id2label(&raw)?;
        let vb = load_weights(model_dir, device)?;
        let root = backbone(&vb);
        let hidden = config.hidden_size;
        let num_labels = labels.len();

        let bert = BertModel::load(root.clone(), &config).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("failed to load BERT backbone: {e}"),
            }
        })?;

        let pooler = candle_nn::linear(hidden, hidden, root.pp("pooler").pp("dense"))?;
        let classifier = candle_nn::linear(hidden, num_labels, vb.pp("classifier"))?;

        Ok(Self {
            bert,
            pooler,
            classifier,
            labels,
        })
    }

    /// Label names indexed by logit position (from `id2label`).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns `[batch, num_labels]` logits.
    pub fn forward(&self, batch: &EncodedBatch) -> Result<Tensor> {
        let hidden = self.bert.forward(
            &batch.input_ids,
            &batch.token_type_ids,
            Some(&batch.attention_mask),
        )?;
        let cls = hidden.i((.., 0, ..))?;

        self.classifier
            .forward(&self.pooler.forward(&cls)?.tanh()?)
    }
}

fn parse_id2label(raw: &serde_json::Value) -> std::result::Result<Vec<String>, EmbeddingError> {
    let map = raw
        .get("id2label")
        .and_then(|v| v.as_object())
        .ok_or_else(|| EmbeddingError::InvalidConfig {
            reason: "config.json has no id2label mapping".to_string(),
        })?;

    let mut labels = vec![String::new(); map.len()];
    for (id, label) in map {
        let index: usize = id.parse().map_err(|_| EmbeddingError::InvalidConfig {
            reason: format!("non-numeric id2label key '{id}'"),
        })?;
        let slot = labels
            .get_mut(index)
            .ok_or_else(|| EmbeddingError::InvalidConfig {
                reason: format!("id2label index {index} out of range"),
            })?;
        *slot = label.as_str().unwrap_or_default().to_string();
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_id2label_orders_by_index() {
        let raw = json!({
            "id2label": {"2": "neutral", "0": "contradiction", "1": "entailment"}
        });

        let labels = parse_id2label(&raw).expect("valid mapping");

        assert_eq!(labels, vec!["contradiction", "entailment", "neutral"]);
    }

    #[test]
    fn test_parse_id2label_missing() {
        let raw = json!({"hidden_size": 384});

        assert!(matches!(
            parse_id2label(&raw),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_model_type_bert_or_absent_accepted() {
        assert!(check_model_type(&json!({"model_type": "bert"})).is_ok());
        assert!(check_model_type(&json!({"hidden_size": 384})).is_ok());
    }

    #[test]
    fn test_model_type_roberta_rejected() {
        for model_type in ["roberta", "xlm-roberta", "deberta-v2"] {
            assert!(
                matches!(
                    check_model_type(&json!({"model_type": model_type})),
                    Err(EmbeddingError::InvalidConfig { .. })
                ),
                "{model_type}"
            );
        }
    }

    #[test]
    fn test_parse_id2label_gap_is_rejected() {
        let raw = json!({"id2label": {"0": "a", "5": "b"}});

        assert!(parse_id2label(&raw).is_err());
    }
}
