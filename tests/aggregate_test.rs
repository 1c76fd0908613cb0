//! Tests for regional aggregation of raw event records

use chrono::NaiveDate;
use risk_mapper::algorithm::aggregate_regions;
use risk_mapper::models::{EnrolmentRecord, UpdateRecord};

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

fn update(state: &str, district: &str) -> UpdateRecord {
    UpdateRecord {
        state: state.to_string(),
        district: district.to_string(),
        pincode: "110001".to_string(),
        date: NaiveDate::from_ymd_opt(2023, 6, 2),
    }
}

#[test]
fn totals_equal_the_sum_of_age_brackets() {
    let enrolments = vec![
        enrolment("Delhi", "Central", "110001", (10, 20, 70)),
        enrolment("Delhi", "Central", "110002", (5, 5, 5)),
        enrolment("Bihar", "Patna", "800001", (1, 2, 3)),
    ];
    let aggregates = aggregate_regions(&enrolments, &[], &[]);

    assert_eq!(aggregates.len(), 2);
    for row in &aggregates {
        assert_eq!(
            row.total_registrations,
            row.age_0_5 + row.age_5_17 + row.age_18_plus
        );
    }

    // Sorted by (state, district): Bihar first
    assert_eq!(aggregates[0].state, "Bihar");
    assert_eq!(aggregates[1].total_registrations, 115);
    assert_eq!(aggregates[1].pincode_count, 2);
}

#[test]
fn regions_without_updates_get_zero_counts_not_dropped() {
    let enrolments = vec![enrolment("Delhi", "Central", "110001", (1, 1, 1))];
    let aggregates = aggregate_regions(&enrolments, &[], &[]);

    assert_eq!(aggregates.len(), 1);
    assert_eq!(aggregates[0].demo_update_count, 0);
    assert_eq!(aggregates[0].bio_update_count, 0);
}

#[test]
fn update_only_regions_are_excluded() {
    let enrolments = vec![enrolment("Delhi", "Central", "110001", (1, 1, 1))];
    let demo = vec![update("Delhi", "Central"), update("Kerala", "Kochi")];
    let bio = vec![update("Kerala", "Kochi")];

    let aggregates = aggregate_regions(&enrolments, &demo, &bio);

    // Kerala/Kochi only appears in update streams, so it never surfaces
    assert_eq!(aggregates.len(), 1);
    assert_eq!(aggregates[0].district, "Central");
    assert_eq!(aggregates[0].demo_update_count, 1);
    assert_eq!(aggregates[0].bio_update_count, 0);
}

#[test]
fn empty_streams_yield_an_empty_table() {
    assert!(aggregate_regions(&[], &[], &[]).is_empty());
}
