use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{FALSE_THRESHOLD, TRUE_THRESHOLD};
use crate::stance::StanceLabel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One document's distilled signal.
pub struct Evidence {
    /// Source URL (one Evidence per unique URL).
    pub url: String,
    /// Registrable host, `www.` stripped.
    pub domain: String,
    /// Sentence closest to the claim.
    pub best_sentence: String,
    /// Cosine similarity to the claim, in `[0, 1]`.
    pub similarity: f64,
    pub stance: StanceLabel,
    /// Probability of `stance`, in `[0, 1]`.
    pub stance_confidence: f64,
    /// Credibility multiplier, always positive.
    pub source_weight: f64,
}

impl Evidence {
    /// `similarity × confidence × direction × weight`.
    #[inline]
    pub fn contribution(&self) -> f64 {
        self.similarity * self.stance_confidence * self.stance.direction() * self.source_weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Discrete verdict.
pub enum VerdictLabel {
    /// No evidence survived retrieval.
    #[serde(rename = "UNVERIFIED")]
    Unverified,
    #[serde(rename = "LIKELY TRUE")]
    LikelyTrue,
    #[serde(rename = "LIKELY FALSE")]
    LikelyFalse,
    #[serde(rename = "MIXED / MISLEADING")]
    Mixed,
}

impl VerdictLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            VerdictLabel::Unverified => "UNVERIFIED",
            VerdictLabel::LikelyTrue => "LIKELY TRUE",
            VerdictLabel::LikelyFalse => "LIKELY FALSE",
            VerdictLabel::Mixed => "MIXED / MISLEADING",
        }
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Which row of the threshold table produced the label.
pub enum ThresholdRule {
    NoEvidence,
    AboveTrueThreshold,
    BelowFalseThreshold,
    WithinMixedBand,
}

impl ThresholdRule {
    /// Thresholds are exclusive on the true/false side.
    pub fn select(has_evidence: bool, net_score: f64) -> Self {
        if !has_evidence {
            ThresholdRule::NoEvidence
        } else if net_score > TRUE_THRESHOLD {
            ThresholdRule::AboveTrueThreshold
        } else if net_score < FALSE_THRESHOLD {
            ThresholdRule::BelowFalseThreshold
        } else {
            ThresholdRule::WithinMixedBand
        }
    }

    pub fn label(self) -> VerdictLabel {
        match self {
            ThresholdRule::NoEvidence => VerdictLabel::Unverified,
            ThresholdRule::AboveTrueThreshold => VerdictLabel::LikelyTrue,
            ThresholdRule::BelowFalseThreshold => VerdictLabel::LikelyFalse,
            ThresholdRule::WithinMixedBand => VerdictLabel::Mixed,
        }
    }

    pub fn describe(self, net_score: f64) -> String {
        match self {
            ThresholdRule::NoEvidence => {
                "no evidence was retrieved, so the claim is unverified".to_string()
            }
            ThresholdRule::AboveTrueThreshold => {
                format!("net score {net_score:.3} > {TRUE_THRESHOLD} => LIKELY TRUE")
            }
            ThresholdRule::BelowFalseThreshold => {
                format!("net score {net_score:.3} < {FALSE_THRESHOLD} => LIKELY FALSE")
            }
            ThresholdRule::WithinMixedBand => format!(
                "{FALSE_THRESHOLD} <= net score {net_score:.3} <= {TRUE_THRESHOLD} => MIXED / MISLEADING"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One audited pipeline stage.
pub struct ExplanationStep {
    pub step: String,
    pub detail: String,
}

impl ExplanationStep {
    pub fn new(step: &str, detail: impl Into<String>) -> Self {
        Self {
            step: step.to_string(),
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Per-stance and per-tier tallies over the evidence set.
pub struct Breakdown {
    pub support_count: usize,
    pub refute_count: usize,
    pub neutral_count: usize,
    /// Sum of positive contributions.
    pub support_weight: f64,
    /// Sum of |negative contributions|.
    pub refute_weight: f64,
    pub high_credibility_count: usize,
    pub low_credibility_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub steps: Vec<ExplanationStep>,
    pub breakdown: Breakdown,
    pub rule: ThresholdRule,
    pub rule_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Final result of one claim check.
pub struct Verdict {
    pub label: VerdictLabel,
    pub net_score: f64,
    /// In `[0, 1]`; 0 for an empty evidence set.
    pub confidence: f64,
    pub evidence: Vec<Evidence>,
    pub explanation: Explanation,
}

impl Verdict {
    pub fn is_unverified(&self) -> bool {
        self.label == VerdictLabel::Unverified
    }
}
