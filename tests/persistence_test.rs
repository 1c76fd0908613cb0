//! Tests for model artifact persistence

use risk_mapper::algorithm::build_risk_features;
use risk_mapper::config::RiskWeights;
use risk_mapper::model::{GradientBoostingConfig, load_artifacts, save_artifacts,
                         train_risk_classifier};
use risk_mapper::models::{RegionAggregate, RiskScoredRegion};

fn scored_fixture() -> Vec<RiskScoredRegion> {
    let mut aggregates = Vec::new();
    for i in 0..15u64 {
        aggregates.push(RegionAggregate {
            state: "Delhi".to_string(),
            district: format!("Thin {i}"),
            age_0_5: 2 + i % 3,
            age_5_17: 10,
            age_18_plus: 80 + i,
            total_registrations: 92 + i % 3 + i,
            pincode_count: 1,
            demo_update_count: 40 + i,
            bio_update_count: 20 + i,
        });
    }
    for i in 0..15u64 {
        aggregates.push(RegionAggregate {
            state: "Delhi".to_string(),
            district: format!("Large {i}"),
            age_0_5: 3000 + 10 * i,
            age_5_17: 4000,
            age_18_plus: 3000,
            total_registrations: 10000 + 10 * i,
            pincode_count: 5,
            demo_update_count: 5 + i,
            bio_update_count: 2 + i,
        });
    }
    build_risk_features(&aggregates, &RiskWeights::default())
}

fn test_config() -> GradientBoostingConfig {
    GradientBoostingConfig {
        n_estimators: 30,
        max_depth: 3,
        min_samples_split: 4,
        min_samples_leaf: 2,
        ..GradientBoostingConfig::default()
    }
}

#[test]
fn round_trip_restores_exact_prediction_behavior() {
    let scored = scored_fixture();
    let outcome = train_risk_classifier(&scored, &test_config(), 0.2).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    let scaler_path = dir.path().join("scaler.json");

    save_artifacts(&outcome.model, &model_path, &scaler_path).unwrap();
    let restored = load_artifacts(&model_path, &scaler_path).unwrap();

    assert_eq!(restored, outcome.model);

    // Bit-reproducible probabilities, not merely equivalent labels
    let before = outcome.model.predict_regions(&scored).unwrap();
    let after = restored.predict_regions(&scored).unwrap();
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.probability.to_bits(), a.probability.to_bits());
        assert_eq!(b.high_risk, a.high_risk);
    }
}

#[test]
fn missing_artifact_files_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_artifacts(
        &dir.path().join("missing_model.json"),
        &dir.path().join("missing_scaler.json"),
    );
    assert!(result.is_err());
}

#[test]
fn corrupt_artifacts_are_fatal() {
    let scored = scored_fixture();
    let outcome = train_risk_classifier(&scored, &test_config(), 0.2).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("model.json");
    let scaler_path = dir.path().join("scaler.json");
    save_artifacts(&outcome.model, &model_path, &scaler_path).unwrap();

    std::fs::write(&scaler_path, b"{ not valid json").unwrap();
    assert!(load_artifacts(&model_path, &scaler_path).is_err());
}
