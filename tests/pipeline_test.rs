//! End-to-end tests over the pipeline stages

use chrono::NaiveDate;
use risk_mapper::algorithm::{PredictionSource, aggregate_regions, build_risk_features,
                             prioritize_regions};
use risk_mapper::config::{PriorityWeights, RiskWeights};
use risk_mapper::model::GradientBoostingConfig;
use risk_mapper::models::{EnrolmentRecord, UpdateRecord};
use risk_mapper::{score_with_model, train_risk_classifier};

fn enrolment(
    state: &str,
    district: &str,
    pincode: &str,
    ages: (u64, u64, u64),
) -> EnrolmentRecord {
    EnrolmentRecord {
        state: state.to_string(),
        district: district.to_string(),
        pincode: pincode.to_string(),
        date: NaiveDate::from_ymd_opt(2023, 6, 1),
        age_0_5: ages.0,
        age_5_17: ages.1,
        age_18_plus: ages.2,
    }
}

fn updates(state: &str, district: &str, n: usize) -> Vec<UpdateRecord> {
    (0..n)
        .map(|_| UpdateRecord {
            state: state.to_string(),
            district: district.to_string(),
            pincode: "0".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 6, 2),
        })
        .collect()
}

/// The two-region reference scenario: region A is small with heavy update
/// churn, region B is ten times larger.
#[test]
fn two_region_reference_scenario() {
    let enrolments = vec![
        enrolment("Delhi", "A", "p1", (5, 10, 35)),
        enrolment("Delhi", "A", "p2", (5, 10, 35)),
        enrolment("Delhi", "B", "q1", (20, 40, 140)),
        enrolment("Delhi", "B", "q2", (20, 40, 140)),
        enrolment("Delhi", "B", "q3", (20, 40, 140)),
        enrolment("Delhi", "B", "q4", (20, 40, 140)),
        enrolment("Delhi", "B", "q5", (20, 40, 140)),
    ];
    let demo: Vec<UpdateRecord> = updates("Delhi", "A", 5)
        .into_iter()
        .chain(updates("Delhi", "B", 50))
        .collect();
    let bio: Vec<UpdateRecord> = updates("Delhi", "A", 2)
        .into_iter()
        .chain(updates("Delhi", "B", 20))
        .collect();

    let aggregates = aggregate_regions(&enrolments, &demo, &bio);
    assert_eq!(aggregates.len(), 2);

    let a = &aggregates[0];
    let b = &aggregates[1];
    assert_eq!(a.district, "A");
    assert_eq!(a.total_registrations, 100);
    assert_eq!(a.age_0_5, 10);
    assert_eq!(a.pincode_count, 2);
    assert_eq!(b.total_registrations, 1000);
    assert_eq!(b.pincode_count, 5);

    let scored = build_risk_features(&aggregates, &RiskWeights::default());
    assert_eq!(scored[0].demo_update_intensity, 5.0 / 101.0);
    assert_eq!(scored[1].demo_update_intensity, 50.0 / 1001.0);

    // Opposite ends of the normalized range
    assert_eq!(scored[0].enroll_risk, 1.0);
    assert_eq!(scored[1].enroll_risk, 0.0);

    let prioritized = prioritize_regions(
        &scored,
        PredictionSource::FallbackScore,
        &PriorityWeights::default(),
    )
    .unwrap();
    assert!(prioritized[0].priority_score >= prioritized[1].priority_score);
}

/// A persisted-style model can score a fresh aggregation run end to end.
#[test]
fn trained_model_scores_a_fresh_table() {
    let mut enrolments = Vec::new();
    let mut demo = Vec::new();
    let mut bio = Vec::new();
    for i in 0..15u64 {
        let district = format!("Thin {i}");
        enrolments.push(enrolment("Delhi", &district, "p", (2 + i % 3, 10, 80 + i)));
        demo.extend(updates("Delhi", &district, 40 + i as usize));
        bio.extend(updates("Delhi", &district, 20 + i as usize));
    }
    for i in 0..15u64 {
        let district = format!("Large {i}");
        enrolments.push(enrolment(
            "Delhi",
            &district,
            "q",
            (3000 + 10 * i, 4000, 3000),
        ));
        demo.extend(updates("Delhi", &district, 5 + i as usize));
        bio.extend(updates("Delhi", &district, 2 + i as usize));
    }

    let weights = RiskWeights::default();
    let aggregates = aggregate_regions(&enrolments, &demo, &bio);
    let scored = build_risk_features(&aggregates, &weights);

    let config = GradientBoostingConfig {
        n_estimators: 30,
        max_depth: 3,
        min_samples_split: 4,
        min_samples_leaf: 2,
        ..GradientBoostingConfig::default()
    };
    let outcome = train_risk_classifier(&scored, &config, 0.2).unwrap();

    let prioritized =
        score_with_model(&aggregates, &outcome.model, &weights, &PriorityWeights::default())
            .unwrap();

    assert_eq!(prioritized.len(), aggregates.len());
    for window in prioritized.windows(2) {
        assert!(window[0].priority_score >= window[1].priority_score);
    }
    for row in &prioritized {
        assert!((0.0..=100.0).contains(&row.priority_score));
        assert!((0.0..=1.0).contains(&row.predicted_risk_probability));
    }
}
