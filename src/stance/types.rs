use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical relationship between an evidence sentence and the claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StanceLabel {
    /// Entailment.
    Supports,
    /// Contradiction.
    Refutes,
    Neutral,
}

impl StanceLabel {
    /// Tie-break order, highest priority first.
    pub const PRIORITY: [StanceLabel; 3] =
        [StanceLabel::Neutral, StanceLabel::Refutes, StanceLabel::Supports];

    /// Sign applied to the evidence contribution.
    #[inline]
    pub fn direction(self) -> f64 {
        match self {
            StanceLabel::Supports => 1.0,
            StanceLabel::Refutes => -1.0,
            StanceLabel::Neutral => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StanceLabel::Supports => "supports",
            StanceLabel::Refutes => "refutes",
            StanceLabel::Neutral => "neutral",
        }
    }

    /// Maps an NLI label name (`entailment`, `CONTRADICTION`, ...) to a stance.
    pub fn from_nli_label(label: &str) -> Option<Self> {
        let label = label.to_ascii_lowercase();
        if label.starts_with("entail") {
            Some(StanceLabel::Supports)
        } else if label.starts_with("contradict") {
            Some(StanceLabel::Refutes)
        } else if label.starts_with("neutral") {
            Some(StanceLabel::Neutral)
        } else {
            None
        }
    }
}

impl fmt::Display for StanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability mass per stance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StanceDistribution {
    pub supports: f64,
    pub refutes: f64,
    pub neutral: f64,
}

impl StanceDistribution {
    pub fn new(supports: f64, refutes: f64, neutral: f64) -> Self {
        Self {
            supports,
            refutes,
            neutral,
        }
    }

    pub fn get(&self, label: StanceLabel) -> f64 {
        match label {
            StanceLabel::Supports => self.supports,
            StanceLabel::Refutes => self.refutes,
            StanceLabel::Neutral => self.neutral,
        }
    }

    pub fn add(&mut self, label: StanceLabel, mass: f64) {
        match label {
            StanceLabel::Supports => self.supports += mass,
            StanceLabel::Refutes => self.refutes += mass,
            StanceLabel::Neutral => self.neutral += mass,
        }
    }

    /// Rescales to sum to one; degenerate input becomes all-neutral.
    pub fn normalized(self) -> Self {
        let sanitize = |p: f64| if p.is_finite() && p > 0.0 { p } else { 0.0 };
        let (s, r, n) = (
            sanitize(self.supports),
            sanitize(self.refutes),
            sanitize(self.neutral),
        );
        let total = s + r + n;
        if total <= 0.0 {
            return Self::new(0.0, 0.0, 1.0);
        }
        Self::new(s / total, r / total, n / total)
    }

    /// Label with the most mass, ties broken by [`StanceLabel::PRIORITY`].
    pub fn winner(&self) -> StanceLabel {
        let mut best = StanceLabel::PRIORITY[0];
        for label in &StanceLabel::PRIORITY[1..] {
            if self.get(*label) > self.get(best) {
                best = *label;
            }
        }
        best
    }
}

/// Output of a stance classifier for one (premise, hypothesis) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StancePrediction {
    pub label: StanceLabel,
    /// Calibrated probability of the winning label, in `[0, 1]`.
    pub confidence: f64,
    pub distribution: StanceDistribution,
}

impl StancePrediction {
    /// Picks the winner of `distribution` and calibrates its probability as
    /// `p^(1/temperature)`.
    pub fn from_distribution(distribution: StanceDistribution, temperature: f64) -> Self {
        let distribution = distribution.normalized();
        let label = distribution.winner();
        let raw = distribution.get(label);

        let confidence = if temperature > 0.0 && temperature.is_finite() {
            raw.powf(1.0 / temperature)
        } else {
            raw
        };

        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
            distribution,
        }
    }

    /// Fixed prediction with all mass on `label` scaled by `confidence`.
    pub fn certain(label: StanceLabel, confidence: f64) -> Self {
        let confidence = confidence.clamp(0.0, 1.0);
        let mut distribution = StanceDistribution::default();
        distribution.add(label, confidence);
        Self {
            label,
            confidence,
            distribution,
        }
    }
}
