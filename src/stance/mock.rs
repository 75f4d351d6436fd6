use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::StanceClassifier;
use super::error::StanceError;
use super::types::{StanceLabel, StancePrediction};

/// Test classifier: predictions are chosen by substring rules on the premise.
pub struct MockStanceClassifier {
    rules: RwLock<Vec<(String, StancePrediction)>>,
    failures: RwLock<Vec<String>>,
    default: StancePrediction,
    calls: AtomicUsize,
}

impl Default for MockStanceClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStanceClassifier {
    /// Unmatched premises are neutral with confidence 0.5.
    pub fn new() -> Self {
        Self::with_default(StancePrediction::certain(StanceLabel::Neutral, 0.5))
    }

    pub fn with_default(default: StancePrediction) -> Self {
        Self {
            rules: RwLock::new(Vec::new()),
            failures: RwLock::new(Vec::new()),
            default,
            calls: AtomicUsize::new(0),
        }
    }

    /// Premises containing `needle` get `label` with `confidence`. First match wins.
    pub fn with_rule(self, needle: &str, label: StanceLabel, confidence: f64) -> Self {
        self.rules
            .write()
            .push((needle.to_string(), StancePrediction::certain(label, confidence)));
        self
    }

    /// Premises containing `needle` fail with [`StanceError::InferenceFailed`].
    pub fn failing_on(self, needle: &str) -> Self {
        self.failures.write().push(needle.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StanceClassifier for MockStanceClassifier {
    fn classify(&self, premise: &str, _hypothesis: &str) -> Result<StancePrediction, StanceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failures.read().iter().any(|n| premise.contains(n.as_str())) {
            return Err(StanceError::InferenceFailed {
                reason: "mock stance failure".to_string(),
            });
        }

        Ok(self
            .rules
            .read()
            .iter()
            .find(|(needle, _)| premise.contains(needle.as_str()))
            .map(|(_, prediction)| *prediction)
            .unwrap_or(self.default))
    }
}
