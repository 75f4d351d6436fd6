use super::*;

mod types_tests {
    use super::*;

    #[test]
    fn test_direction() {
        assert_eq!(StanceLabel::Supports.direction(), 1.0);
        assert_eq!(StanceLabel::Refutes.direction(), -1.0);
        assert_eq!(StanceLabel::Neutral.direction(), 0.0);
    }

    #[test]
    fn test_label_serde_lowercase() {
        let json = serde_json::to_string(&StanceLabel::Refutes).unwrap();
        assert_eq!(json, "\"refutes\"");
        assert_eq!(StanceLabel::Supports.to_string(), "supports");
    }

    #[test]
    fn test_from_nli_label() {
        assert_eq!(
            StanceLabel::from_nli_label("ENTAILMENT"),
            Some(StanceLabel::Supports)
        );
        assert_eq!(
            StanceLabel::from_nli_label("contradiction"),
            Some(StanceLabel::Refutes)
        );
        assert_eq!(
            StanceLabel::from_nli_label("Neutral"),
            Some(StanceLabel::Neutral)
        );
        assert_eq!(StanceLabel::from_nli_label("LABEL_0"), None);
    }

    #[test]
    fn test_winner_clear() {
        let dist = StanceDistribution::new(0.7, 0.2, 0.1);
        assert_eq!(dist.winner(), StanceLabel::Supports);
    }

    #[test]
    fn test_winner_tie_prefers_neutral() {
        let dist = StanceDistribution::new(0.4, 0.2, 0.4);
        assert_eq!(dist.winner(), StanceLabel::Neutral);
    }

    #[test]
    fn test_winner_tie_prefers_refutes_over_supports() {
        let dist = StanceDistribution::new(0.45, 0.45, 0.1);
        assert_eq!(dist.winner(), StanceLabel::Refutes);
    }

    #[test]
    fn test_normalized() {
        let dist = StanceDistribution::new(2.0, 1.0, 1.0).normalized();
        assert!((dist.supports - 0.5).abs() < 1e-12);
        assert!((dist.refutes - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_degenerate_is_neutral() {
        let dist = StanceDistribution::new(f64::NAN, -1.0, 0.0).normalized();
        assert_eq!(dist, StanceDistribution::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_prediction_identity_calibration() {
        let prediction =
            StancePrediction::from_distribution(StanceDistribution::new(0.1, 0.81, 0.09), 1.0);

        assert_eq!(prediction.label, StanceLabel::Refutes);
        assert!((prediction.confidence - 0.81).abs() < 1e-12);
    }

    #[test]
    fn test_prediction_temperature_softens() {
        let prediction =
            StancePrediction::from_distribution(StanceDistribution::new(0.81, 0.1, 0.09), 2.0);

        assert_eq!(prediction.label, StanceLabel::Supports);
        assert!((prediction.confidence - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_certain_clamps() {
        let prediction = StancePrediction::certain(StanceLabel::Supports, 1.7);
        assert_eq!(prediction.confidence, 1.0);
    }
}

mod config_tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::path::PathBuf;

    #[test]
    fn test_default_is_stub() {
        let config = StanceConfig::default();
        assert!(config.model_path.is_none());
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_temperature() {
        assert!(StanceConfig::stub().with_temperature(0.0).validate().is_err());
        assert!(
            StanceConfig::stub()
                .with_temperature(f64::INFINITY)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_rejects_empty_path() {
        assert!(StanceConfig::new("").validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        // SAFETY: Test code only, we accept the thread-safety risk in tests.
        unsafe {
            env::set_var(StanceConfig::ENV_MODEL_PATH, "/models/nli");
            env::set_var(StanceConfig::ENV_TEMPERATURE, "1.3");
        }
        let config = StanceConfig::from_env();
        // SAFETY: Test code only, we accept the thread-safety risk in tests.
        unsafe {
            env::remove_var(StanceConfig::ENV_MODEL_PATH);
            env::remove_var(StanceConfig::ENV_TEMPERATURE);
        }

        assert_eq!(config.model_path, Some(PathBuf::from("/models/nli")));
        assert_eq!(config.temperature, 1.3);
    }

    #[test]
    #[serial]
    fn test_from_env_bad_temperature_falls_back() {
        // SAFETY: Test code only, we accept the thread-safety risk in tests.
        unsafe { env::set_var(StanceConfig::ENV_TEMPERATURE, "warm") };
        let config = StanceConfig::from_env();
        // SAFETY: Test code only, we accept the thread-safety risk in tests.
        unsafe { env::remove_var(StanceConfig::ENV_TEMPERATURE) };

        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }
}

mod classifier_tests {
    use super::*;

    fn classifier() -> NliClassifier {
        NliClassifier::stub().expect("stub should load")
    }

    #[test]
    fn test_stub_mode() {
        assert!(!classifier().is_model_loaded());
    }

    #[test]
    fn test_load_invalid_config() {
        let result = NliClassifier::load(StanceConfig::stub().with_temperature(-1.0));
        assert!(matches!(result, Err(StanceError::InvalidConfig { .. })));
    }

    #[test]
    fn test_load_missing_model() {
        let result = NliClassifier::load(StanceConfig::new("/nonexistent/nli-model"));
        assert!(matches!(result, Err(StanceError::ModelNotFound { .. })));
    }

    #[test]
    fn test_load_rejects_roberta_checkpoint() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("config.json"),
            r#"{"model_type": "roberta", "id2label": {"0": "CONTRADICTION", "1": "NEUTRAL", "2": "ENTAILMENT"}}"#,
        )
        .expect("write config");
        std::fs::write(dir.path().join("model.safetensors"), b"").expect("write weights");
        std::fs::write(dir.path().join("tokenizer.json"), b"{}").expect("write tokenizer");

        let result = NliClassifier::load(StanceConfig::new(dir.path()));

        assert!(matches!(result, Err(StanceError::InvalidConfig { .. })));
    }

    #[test]
    fn test_stub_supporting_sentence() {
        let prediction = classifier()
            .classify(
                "The Eiffel Tower is located in Paris, France.",
                "The Eiffel Tower is located in Paris",
            )
            .unwrap();

        assert_eq!(prediction.label, StanceLabel::Supports);
        assert!(prediction.confidence > 0.9);
    }

    #[test]
    fn test_stub_debunking_sentence() {
        let prediction = classifier()
            .classify(
                "It is false that the Eiffel Tower is located in Berlin.",
                "The Eiffel Tower is located in Berlin",
            )
            .unwrap();

        assert_eq!(prediction.label, StanceLabel::Refutes);
    }

    #[test]
    fn test_stub_unrelated_sentence() {
        let prediction = classifier()
            .classify(
                "Stock markets closed higher on Tuesday.",
                "The Eiffel Tower is located in Berlin",
            )
            .unwrap();

        assert_eq!(prediction.label, StanceLabel::Neutral);
        assert!((prediction.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_stub_matching_negation_supports() {
        let prediction = classifier()
            .classify(
                "Large studies show vaccines do not cause autism.",
                "Vaccines do not cause autism",
            )
            .unwrap();

        assert_eq!(prediction.label, StanceLabel::Supports);
    }

    #[test]
    fn test_confidence_in_unit_interval() {
        let classifier = classifier();
        for (premise, hypothesis) in [
            ("", "The claim under test is here"),
            ("Some premise text here.", ""),
            ("Paris Paris Paris", "Paris"),
        ] {
            let prediction = classifier.classify(premise, hypothesis).unwrap();
            assert!((0.0..=1.0).contains(&prediction.confidence));
        }
    }

    #[test]
    fn test_mock_rules_and_failures() {
        let mock = MockStanceClassifier::new()
            .with_rule("confirmed", StanceLabel::Supports, 0.9)
            .failing_on("corrupt");

        let supports = mock.classify("Officials confirmed it.", "claim").unwrap();
        assert_eq!(supports.label, StanceLabel::Supports);

        let neutral = mock.classify("Nothing relevant.", "claim").unwrap();
        assert_eq!(neutral.label, StanceLabel::Neutral);

        assert!(mock.classify("corrupt input", "claim").is_err());
        assert_eq!(mock.call_count(), 3);
    }
}
