//! Tests for classifier training, evaluation and inference

use risk_mapper::algorithm::build_risk_features;
use risk_mapper::config::RiskWeights;
use risk_mapper::model::{FeatureMatrix, GradientBoostingConfig, ModelError, train_risk_classifier};
use risk_mapper::models::{RegionAggregate, RiskScoredRegion};

fn region(i: u64, ages: (u64, u64, u64), demo: u64, bio: u64) -> RegionAggregate {
    RegionAggregate {
        state: "Delhi".to_string(),
        district: format!("District {i}"),
        age_0_5: ages.0,
        age_5_17: ages.1,
        age_18_plus: ages.2,
        total_registrations: ages.0 + ages.1 + ages.2,
        pincode_count: 1 + i % 4,
        demo_update_count: demo,
        bio_update_count: bio,
    }
}

/// 15 thin, update-heavy regions and 15 large stable ones: the composite
/// score separates them cleanly into both classes.
fn scored_fixture() -> Vec<RiskScoredRegion> {
    let mut aggregates = Vec::new();
    for i in 0..15 {
        aggregates.push(region(i, (2 + i % 3, 10, 80 + i), 40 + i, 20 + i));
    }
    for i in 15..30 {
        aggregates.push(region(i, (3000 + 10 * i, 4000, 3000), 5 + i, 2 + i));
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
fn training_separates_the_two_groups() {
    let scored = scored_fixture();
    let outcome = train_risk_classifier(&scored, &test_config(), 0.2).unwrap();

    assert!(outcome.metrics.accuracy >= 0.8);
    assert!(outcome.metrics.roc_auc >= 0.9);
    assert!(outcome.metrics.cv_auc_mean.is_finite());
    assert!(outcome.metrics.cv_auc_std.is_finite());

    let predictions = outcome.model.predict_regions(&scored).unwrap();
    assert_eq!(predictions.len(), scored.len());
    for prediction in &predictions {
        assert!((0.0..=1.0).contains(&prediction.probability));
        assert_eq!(prediction.high_risk, prediction.probability >= 0.5);
    }
}

#[test]
fn feature_importance_is_sorted_descending() {
    let scored = scored_fixture();
    let outcome = train_risk_classifier(&scored, &test_config(), 0.2).unwrap();

    assert_eq!(outcome.importance.len(), 10);
    for window in outcome.importance.windows(2) {
        assert!(window[0].importance >= window[1].importance);
    }
    let total: f64 = outcome.importance.iter().map(|r| r.importance).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn mismatched_feature_columns_are_a_fatal_error() {
    let scored = scored_fixture();
    let outcome = train_risk_classifier(&scored, &test_config(), 0.2).unwrap();

    let wrong = FeatureMatrix::new(
        vec!["not_a_feature".to_string()],
        vec![vec![1.0, 2.0, 3.0]],
    );
    assert!(matches!(
        outcome.model.predict(&wrong),
        Err(ModelError::FeatureMismatch { .. })
    ));
}

#[test]
fn training_on_an_empty_table_fails() {
    assert!(matches!(
        train_risk_classifier(&[], &test_config(), 0.2),
        Err(ModelError::EmptyMatrix)
    ));
}

#[test]
fn single_class_tables_are_rejected() {
    // Identical regions: every composite score is the same, one class only
    let aggregates: Vec<RegionAggregate> =
        (0..30).map(|_| region(1, (10, 10, 10), 3, 3)).collect();
    let scored = build_risk_features(&aggregates, &RiskWeights::default());

    assert!(matches!(
        train_risk_classifier(&scored, &test_config(), 0.2),
        Err(ModelError::SingleClass)
    ));
}

#[test]
fn same_seed_trains_the_same_model() {
    let scored = scored_fixture();
    let a = train_risk_classifier(&scored, &test_config(), 0.2).unwrap();
    let b = train_risk_classifier(&scored, &test_config(), 0.2).unwrap();

    assert_eq!(
        a.model.predict_regions(&scored).unwrap(),
        b.model.predict_regions(&scored).unwrap()
    );
    assert_eq!(a.metrics, b.metrics);
}
