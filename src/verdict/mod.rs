//! Deterministic fusion of evidence into a verdict.
//!
//! Each evidence record contributes `similarity × confidence × direction ×
//! weight`; the signed sum is mapped onto the threshold table in
//! [`ThresholdRule`]. Everything here, explanation included, is a pure
//! function of the evidence set, so the result does not depend on the order
//! in which retrieval units finished.

mod types;

#[cfg(test)]
mod tests;

pub use types::{
    Breakdown, Evidence, Explanation, ExplanationStep, ThresholdRule, Verdict, VerdictLabel,
};

use std::collections::HashSet;

use tracing::debug;

use crate::credibility::SourceTier;
use crate::stance::StanceLabel;

/// Aggregates `evidence` into a verdict.
pub fn aggregate(evidence: Vec<Evidence>) -> Verdict {
    let contributions = sorted_contributions(&evidence);
    let net_score = sum(&contributions);
    let confidence = confidence(&contributions);

    let rule = ThresholdRule::select(!evidence.is_empty(), net_score);
    let breakdown = breakdown(&evidence);
    let steps = explanation_steps(&evidence, &breakdown, net_score);

    debug!(
        evidence = evidence.len(),
        net_score,
        confidence,
        label = %rule.label(),
        "Aggregated verdict"
    );

    Verdict {
        label: rule.label(),
        net_score,
        confidence,
        explanation: Explanation {
            steps,
            breakdown,
            rule,
            rule_description: rule.describe(net_score),
        },
        evidence,
    }
}

/// Signed net score; summed in canonical order so any permutation of
/// `evidence` gives a bit-identical result.
pub fn net_score(evidence: &[Evidence]) -> f64 {
    sum(&sorted_contributions(evidence))
}

fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc + v)
}

fn sorted_contributions(evidence: &[Evidence]) -> Vec<f64> {
    let mut contributions: Vec<f64> = evidence.iter().map(Evidence::contribution).collect();
    contributions.sort_by(f64::total_cmp);
    contributions
}

/// `agreement × strength`, where agreement is `|net| / Σ|c|` and strength is
/// `1 − e^(−|net|)`. Zero without directional evidence.
fn confidence(contributions: &[f64]) -> f64 {
    let mut magnitudes: Vec<f64> = contributions.iter().map(|c| c.abs()).collect();
    magnitudes.sort_by(f64::total_cmp);
    let total = sum(&magnitudes);
    if total <= 0.0 || !total.is_finite() {
        return 0.0;
    }

    let net = sum(contributions).abs();
    let agreement = (net / total).min(1.0);
    let strength = 1.0 - (-net).exp();

    (agreement * strength).clamp(0.0, 1.0)
}

fn breakdown(evidence: &[Evidence]) -> Breakdown {
    let mut out = Breakdown::default();
    let mut support = Vec::new();
    let mut refute = Vec::new();

    for item in evidence {
        match item.stance {
            StanceLabel::Supports => {
                out.support_count += 1;
                support.push(item.contribution());
            }
            StanceLabel::Refutes => {
                out.refute_count += 1;
                refute.push(-item.contribution());
            }
            StanceLabel::Neutral => out.neutral_count += 1,
        }

        match SourceTier::from_weight(item.source_weight) {
            SourceTier::High => out.high_credibility_count += 1,
            SourceTier::Low => out.low_credibility_count += 1,
            SourceTier::Default => {}
        }
    }

    support.sort_by(f64::total_cmp);
    refute.sort_by(f64::total_cmp);
    out.support_weight = sum(&support);
    out.refute_weight = sum(&refute);
    out
}

fn explanation_steps(
    evidence: &[Evidence],
    breakdown: &Breakdown,
    net_score: f64,
) -> Vec<ExplanationStep> {
    let domains: HashSet<&str> = evidence.iter().map(|e| e.domain.as_str()).collect();

    let retrieved = format!(
        "{} documents yielded evidence from {} domains",
        evidence.len(),
        domains.len()
    );

    vec![
        ExplanationStep::new("claim_processed", "claim normalised and embedded"),
        ExplanationStep::new("queries_issued", "search queries issued"),
        ExplanationStep::new("evidence_retrieved", retrieved),
        ExplanationStep::new(
            "stance_computed",
            format!(
                "{} supporting, {} refuting, {} neutral",
                breakdown.support_count, breakdown.refute_count, breakdown.neutral_count
            ),
        ),
        ExplanationStep::new(
            "score_aggregated",
            format!(
                "net score {net_score:.3} from {} weighted contributions",
                evidence.len()
            ),
        ),
    ]
}
