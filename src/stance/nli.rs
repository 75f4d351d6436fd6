use std::collections::HashSet;

use candle_core::Device;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use super::config::StanceConfig;
use super::error::StanceError;
use super::types::{StanceDistribution, StanceLabel, StancePrediction};
use super::StanceClassifier;
use crate::embedding::bert::BertSequenceClassifier;
use crate::embedding::device::select_device;
use crate::embedding::utils::{EncodedBatch, check_model_dir, load_tokenizer};
use crate::text::content_words;

const NEGATION_CUES: &[&str] = &[
    "not", "no", "never", "false", "fake", "hoax", "myth", "debunked", "debunk", "misleading",
    "untrue", "incorrect", "baseless", "fabricated", "denied", "denies", "refuted", "disproved",
    "isn't", "wasn't", "aren't", "doesn't", "didn't", "cannot", "can't", "won't", "nor",
];

struct NliModel {
    classifier: BertSequenceClassifier,
    tokenizer: Tokenizer,
    /// Stance for each logit position.
    labels: Vec<StanceLabel>,
}

/// NLI cross-encoder stance classifier (supports a lexical stub mode).
///
/// The evidence sentence is the premise and the claim is the hypothesis.
pub struct NliClassifier {
    device: Device,
    config: StanceConfig,
    model: Option<NliModel>,
}

impl std::fmt::Debug for NliClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NliClassifier")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.model.is_some())
            .finish()
    }
}

impl NliClassifier {
    pub fn load(config: StanceConfig) -> Result<Self, StanceError> {
        if let Err(reason) = config.validate() {
            return Err(StanceError::InvalidConfig { reason });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for stance classifier");

        let Some(model_path) = config.model_path.clone() else {
            warn!("No stance model path configured, using lexical stub");
            return Ok(Self {
                device,
                config,
                model: None,
            });
        };

        check_model_dir(&model_path)?;

        info!(
            model_path = %model_path.display(),
            temperature = config.temperature,
            "Loading stance model"
        );

        let classifier = BertSequenceClassifier::load(&model_path, &device)?;
        let labels = classifier
            .labels()
            .iter()
            .map(|label| {
                StanceLabel::from_nli_label(label).ok_or_else(|| StanceError::UnknownLabel {
                    label: label.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let tokenizer = load_tokenizer(&model_path, config.max_seq_len)?;

        info!(labels = ?labels, "Stance model loaded");

        Ok(Self {
            device,
            config,
            model: Some(NliModel {
                classifier,
                tokenizer,
                labels,
            }),
        })
    }

    pub fn stub() -> Result<Self, StanceError> {
        Self::load(StanceConfig::stub())
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &StanceConfig {
        &self.config
    }

    fn model_distribution(
        &self,
        model: &NliModel,
        premise: &str,
        hypothesis: &str,
    ) -> Result<StanceDistribution, StanceError> {
        let encoding = model
            .tokenizer
            .encode((premise, hypothesis), true)
            .map_err(|e| StanceError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        let batch = EncodedBatch::from_encodings(&[encoding], &self.device)?;
        let logits = model.classifier.forward(&batch)?;
        let probs = candle_nn::ops::softmax_last_dim(&logits)?.to_vec2::<f32>()?;
        let row = probs
            .into_iter()
            .next()
            .ok_or_else(|| StanceError::InferenceFailed {
                reason: "classifier returned no logits".to_string(),
            })?;

        let mut distribution = StanceDistribution::default();
        for (label, p) in model.labels.iter().zip(row) {
            distribution.add(*label, f64::from(p));
        }
        Ok(distribution)
    }
}

impl StanceClassifier for NliClassifier {
    fn classify(&self, premise: &str, hypothesis: &str) -> Result<StancePrediction, StanceError> {
        let distribution = match &self.model {
            Some(model) => self.model_distribution(model, premise, hypothesis)?,
            None => lexical_distribution(premise, hypothesis),
        };

        let prediction = StancePrediction::from_distribution(distribution, self.config.temperature);

        debug!(
            premise_len = premise.len(),
            label = %prediction.label,
            confidence = prediction.confidence,
            model_loaded = self.model.is_some(),
            "Classified stance"
        );

        Ok(prediction)
    }
}

/// Stub heuristic: topical overlap decides how directional the pair is, and a
/// polarity mismatch (negation or debunk wording on one side only) flips the
/// direction from supports to refutes.
fn lexical_distribution(premise: &str, hypothesis: &str) -> StanceDistribution {
    let claim_words: HashSet<String> = content_words(hypothesis)
        .into_iter()
        .filter(|w| !is_negation_cue(w))
        .collect();
    let premise_words: HashSet<String> = content_words(premise)
        .into_iter()
        .filter(|w| !is_negation_cue(w))
        .collect();

    if claim_words.is_empty() {
        return StanceDistribution::new(0.0, 0.0, 1.0);
    }

    let matches = claim_words.intersection(&premise_words).count();
    let recall = matches as f64 / claim_words.len() as f64;
    let union = claim_words.union(&premise_words).count();
    let jaccard = if union > 0 {
        matches as f64 / union as f64
    } else {
        0.0
    };
    let overlap = 0.6 * recall + 0.4 * jaccard;

    if overlap < 0.15 {
        return StanceDistribution::new(0.1, 0.1, 0.8);
    }

    let directional = 1.0 / (1.0 + (-8.0 * (overlap - 0.5)).exp());
    let rest = 1.0 - directional;

    if has_negation(premise) != has_negation(hypothesis) {
        StanceDistribution::new(0.3 * rest, directional, 0.7 * rest)
    } else {
        StanceDistribution::new(directional, 0.3 * rest, 0.7 * rest)
    }
}

fn has_negation(text: &str) -> bool {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|w| w.replace('\u{2019}', "'"))
        .any(|w| is_negation_cue(&w))
}

fn is_negation_cue(word: &str) -> bool {
    NEGATION_CUES.contains(&word)
}
