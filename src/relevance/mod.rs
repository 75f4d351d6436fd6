//! Relevance gate: one representative sentence per document.
//!
//! Filtering is soft. The best sentence always survives (however weak) and its
//! similarity later scales the evidence contribution. Only a document with no
//! sentences at all produces nothing.


use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedding::{EmbeddingError, TextEmbedder};

/// Highest-similarity sentence of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSentence {
    pub index: usize,
    pub sentence: String,
    /// Cosine similarity to the claim, clamped to `[0, 1]`.
    pub similarity: f64,
}

/// Cosine similarity `(a·b) / (‖a‖‖b‖)`, computed in `f64`.
///
/// Mismatched lengths, empty or zero vectors yield `0.0`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}

/// Index and clamped similarity of the candidate closest to `claim_vector`.
///
/// Ties keep the earliest candidate; `None` when there are no candidates.
pub fn best_match(claim_vector: &[f32], candidates: &[Vec<f32>]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let similarity = clamp_similarity(cosine_similarity(claim_vector, candidate));
        match best {
            Some((_, current)) if similarity <= current => {}
            _ => best = Some((index, similarity)),
        }
    }

    best
}

/// Embeds `sentences` and keeps the single one closest to the claim.
pub fn select_best_sentence(
    claim_vector: &[f32],
    sentences: &[String],
    embedder: &dyn TextEmbedder,
) -> Result<Option<BestSentence>, EmbeddingError> {
    if sentences.is_empty() {
        return Ok(None);
    }

    let refs: Vec<&str> = sentences.iter().map(String::as_str).collect();
    let vectors = embedder.embed_batch(&refs)?;

    let Some((index, similarity)) = best_match(claim_vector, &vectors) else {
        return Ok(None);
    };

    debug!(
        candidates = sentences.len(),
        index, similarity, "Selected best sentence"
    );

    Ok(Some(BestSentence {
        index,
        sentence: sentences[index].clone(),
        similarity,
    }))
}

fn clamp_similarity(similarity: f64) -> f64 {
    if similarity.is_nan() {
        0.0
    } else {
        similarity.clamp(0.0, 1.0)
    }
}
