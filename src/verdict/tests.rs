use super::*;

const EPS: f64 = 1e-9;

fn evidence(domain: &str, similarity: f64, stance: StanceLabel, confidence: f64, weight: f64) -> Evidence {
    Evidence {
        url: format!("https://{domain}/article"),
        domain: domain.to_string(),
        best_sentence: "A sentence long enough to count as evidence.".to_string(),
        similarity,
        stance,
        stance_confidence: confidence,
        source_weight: weight,
    }
}

mod score_tests {
    use super::*;

    #[test]
    fn test_single_trusted_supporting_source() {
        let verdict = aggregate(vec![evidence(
            "reuters.com",
            0.9,
            StanceLabel::Supports,
            0.9,
            1.5,
        )]);

        assert!((verdict.net_score - 1.215).abs() < EPS);
        assert_eq!(verdict.label, VerdictLabel::LikelyTrue);
        assert_eq!(verdict.explanation.rule, ThresholdRule::AboveTrueThreshold);
    }

    #[test]
    fn test_support_and_refute_net_to_mixed() {
        let verdict = aggregate(vec![
            evidence("a.example", 0.8, StanceLabel::Supports, 0.7, 1.0),
            evidence("b.example", 0.6, StanceLabel::Refutes, 0.6, 0.5),
        ]);

        assert!((verdict.net_score - 0.38).abs() < EPS);
        assert_eq!(verdict.label, VerdictLabel::Mixed);
    }

    #[test]
    fn test_refuting_sources_give_likely_false() {
        let verdict = aggregate(vec![
            evidence("snopes.com", 0.9, StanceLabel::Refutes, 0.95, 1.5),
            evidence("a.example", 0.7, StanceLabel::Refutes, 0.8, 1.0),
        ]);

        assert!(verdict.net_score < -0.4);
        assert_eq!(verdict.label, VerdictLabel::LikelyFalse);
        assert_eq!(verdict.explanation.rule, ThresholdRule::BelowFalseThreshold);
    }

    #[test]
    fn test_boundaries_are_mixed() {
        let upper = aggregate(vec![evidence("a.example", 1.0, StanceLabel::Supports, 0.4, 1.0)]);
        let lower = aggregate(vec![evidence("a.example", 1.0, StanceLabel::Refutes, 0.4, 1.0)]);

        assert_eq!(upper.net_score, 0.4);
        assert_eq!(upper.label, VerdictLabel::Mixed);
        assert_eq!(lower.net_score, -0.4);
        assert_eq!(lower.label, VerdictLabel::Mixed);
    }

    #[test]
    fn test_net_score_is_exact_sum() {
        let set = vec![
            evidence("a.example", 0.31, StanceLabel::Supports, 0.77, 1.2),
            evidence("b.example", 0.52, StanceLabel::Refutes, 0.61, 0.4),
            evidence("c.example", 0.93, StanceLabel::Neutral, 0.88, 1.5),
            evidence("d.example", 0.64, StanceLabel::Supports, 0.55, 1.0),
        ];
        let expected = 0.31 * 0.77 * 1.2 - 0.52 * 0.61 * 0.4 + 0.64 * 0.55 * 1.0;

        assert!((net_score(&set) - expected).abs() < EPS);
        assert!((aggregate(set).net_score - expected).abs() < EPS);
    }

    #[test]
    fn test_neutral_only_is_mixed_with_zero_confidence() {
        let verdict = aggregate(vec![evidence("a.example", 0.9, StanceLabel::Neutral, 0.9, 1.0)]);

        assert_eq!(verdict.net_score, 0.0);
        assert_eq!(verdict.label, VerdictLabel::Mixed);
        assert_eq!(verdict.confidence, 0.0);
    }
}

mod empty_tests {
    use super::*;

    #[test]
    fn test_empty_set_is_unverified() {
        let verdict = aggregate(Vec::new());

        assert_eq!(verdict.label, VerdictLabel::Unverified);
        assert!(verdict.is_unverified());
        assert_eq!(verdict.net_score, 0.0);
        assert_eq!(verdict.confidence, 0.0);
        assert_eq!(verdict.explanation.rule, ThresholdRule::NoEvidence);
        assert_eq!(verdict.explanation.breakdown, Breakdown::default());
    }
}

mod order_tests {
    use super::*;

    fn sample() -> Vec<Evidence> {
        vec![
            evidence("a.example", 0.91, StanceLabel::Supports, 0.83, 1.5),
            evidence("b.example", 0.47, StanceLabel::Refutes, 0.66, 0.5),
            evidence("c.example", 0.72, StanceLabel::Neutral, 0.91, 1.0),
            evidence("d.example", 0.15, StanceLabel::Supports, 0.51, 1.3),
            evidence("e.example", 0.66, StanceLabel::Refutes, 0.97, 1.4),
        ]
    }

    #[test]
    fn test_permutations_give_identical_verdicts() {
        let reference = aggregate(sample());

        let mut reversed = sample();
        reversed.reverse();
        let mut rotated = sample();
        rotated.rotate_left(2);
        let mut swapped = sample();
        swapped.swap(0, 4);
        swapped.swap(1, 3);

        for permutation in [reversed, rotated, swapped] {
            let verdict = aggregate(permutation);
            assert_eq!(verdict.label, reference.label);
            assert_eq!(verdict.net_score.to_bits(), reference.net_score.to_bits());
            assert_eq!(verdict.confidence.to_bits(), reference.confidence.to_bits());
            assert_eq!(verdict.explanation.breakdown, reference.explanation.breakdown);
        }
    }
}

mod confidence_tests {
    use super::*;

    #[test]
    fn test_confidence_in_unit_interval() {
        let verdict = aggregate(vec![
            evidence("a.example", 1.0, StanceLabel::Supports, 1.0, 1.5),
            evidence("b.example", 1.0, StanceLabel::Supports, 1.0, 1.5),
            evidence("c.example", 1.0, StanceLabel::Supports, 1.0, 1.5),
        ]);

        assert!(verdict.confidence > 0.0);
        assert!(verdict.confidence <= 1.0);
    }

    #[test]
    fn test_confidence_grows_with_agreeing_sources() {
        let mut set = Vec::new();
        let mut previous = 0.0;

        for i in 0..6 {
            set.push(evidence(
                &format!("source{i}.example"),
                0.85,
                StanceLabel::Supports,
                0.9,
                1.4,
            ));
            let confidence = aggregate(set.clone()).confidence;
            assert!(confidence >= previous, "confidence dropped at {i}");
            previous = confidence;
        }

        assert!(previous > 0.9);
    }

    #[test]
    fn test_contradiction_lowers_confidence() {
        let agreeing = aggregate(vec![
            evidence("a.example", 0.9, StanceLabel::Supports, 0.9, 1.0),
            evidence("b.example", 0.9, StanceLabel::Supports, 0.9, 1.0),
        ]);
        let split = aggregate(vec![
            evidence("a.example", 0.9, StanceLabel::Supports, 0.9, 1.0),
            evidence("b.example", 0.9, StanceLabel::Supports, 0.9, 1.0),
            evidence("c.example", 0.9, StanceLabel::Refutes, 0.9, 1.0),
        ]);

        assert!(split.confidence < agreeing.confidence);
    }

    #[test]
    fn test_weak_evidence_has_low_confidence() {
        let verdict = aggregate(vec![evidence("a.example", 0.1, StanceLabel::Supports, 0.4, 1.0)]);

        assert!(verdict.confidence < 0.05);
    }
}

mod explanation_tests {
    use super::*;

    #[test]
    fn test_breakdown_counts_and_weights() {
        let verdict = aggregate(vec![
            evidence("reuters.com", 0.8, StanceLabel::Supports, 0.5, 1.5),
            evidence("twitter.com", 0.5, StanceLabel::Refutes, 0.8, 0.5),
            evidence("a.example", 0.9, StanceLabel::Neutral, 0.7, 1.0),
        ]);
        let breakdown = &verdict.explanation.breakdown;

        assert_eq!(breakdown.support_count, 1);
        assert_eq!(breakdown.refute_count, 1);
        assert_eq!(breakdown.neutral_count, 1);
        assert!((breakdown.support_weight - 0.6).abs() < EPS);
        assert!((breakdown.refute_weight - 0.2).abs() < EPS);
        assert_eq!(breakdown.high_credibility_count, 1);
        assert_eq!(breakdown.low_credibility_count, 1);
    }

    #[test]
    fn test_steps_in_pipeline_order() {
        let verdict = aggregate(vec![evidence("a.example", 0.9, StanceLabel::Supports, 0.9, 1.0)]);
        let names: Vec<&str> = verdict
            .explanation
            .steps
            .iter()
            .map(|s| s.step.as_str())
            .collect();

        assert_eq!(
            names,
            vec![
                "claim_processed",
                "queries_issued",
                "evidence_retrieved",
                "stance_computed",
                "score_aggregated"
            ]
        );
        assert!(verdict.explanation.rule_description.contains("LIKELY TRUE"));
    }

    #[test]
    fn test_explanation_derived_from_evidence_alone() {
        let set = vec![
            evidence("a.example", 0.9, StanceLabel::Refutes, 0.9, 1.0),
            evidence("b.example", 0.6, StanceLabel::Supports, 0.7, 1.4),
            evidence("a.example", 0.4, StanceLabel::Neutral, 0.8, 1.0),
        ];
        let mut reversed = set.clone();
        reversed.reverse();

        let forward = aggregate(set);
        let backward = aggregate(reversed);

        assert_eq!(forward.explanation, backward.explanation);
        assert!(
            forward.explanation.steps[2]
                .detail
                .contains("3 documents yielded evidence from 2 domains")
        );
    }

    #[test]
    fn test_label_serializes_as_display_text() {
        let json = serde_json::to_string(&VerdictLabel::Mixed).unwrap();
        assert_eq!(json, "\"MIXED / MISLEADING\"");
        assert_eq!(VerdictLabel::LikelyFalse.to_string(), "LIKELY FALSE");
    }
}
