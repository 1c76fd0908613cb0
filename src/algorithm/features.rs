//! Risk feature engineering
//!
//! Widens a region aggregate table into a risk-scored table: derived
//! ratios, four min-max normalized component risks and the weighted
//! composite exclusion risk score.
//!
//! Ratios use a `+1` denominator. That is a deliberate smoothing choice
//! for very-low-volume regions, not a missing-data guard: downstream score
//! magnitudes depend on it, so it must not be replaced by an epsilon.

use crate::config::RiskWeights;
use crate::models::{RegionAggregate, RiskScoredRegion};

/// Min-max normalize a column to [0, 1] over the current table
///
/// A degenerate range (constant column, or fewer than two rows) maps every
/// value to 0: no variance means no relative risk contribution.
#[must_use]
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if values.is_empty() || range <= 0.0 || !range.is_finite() {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - min) / range).collect()
}

/// Widen a region aggregate table into a risk-scored region table
///
/// Normalization is per-run over the rows given here, so scores are only
/// comparable within one table, never across runs with different region
/// universes.
#[must_use]
pub fn build_risk_features(
    aggregates: &[RegionAggregate],
    weights: &RiskWeights,
) -> Vec<RiskScoredRegion> {
    let totals: Vec<f64> = aggregates
        .iter()
        .map(|a| a.total_registrations as f64)
        .collect();
    let child_rates: Vec<f64> = aggregates
        .iter()
        .map(|a| a.age_0_5 as f64 / (a.total_registrations as f64 + 1.0))
        .collect();
    let demo_intensities: Vec<f64> = aggregates
        .iter()
        .map(|a| a.demo_update_count as f64 / (a.total_registrations as f64 + 1.0))
        .collect();
    let bio_intensities: Vec<f64> = aggregates
        .iter()
        .map(|a| a.bio_update_count as f64 / (a.total_registrations as f64 + 1.0))
        .collect();

    let totals_norm = min_max_normalize(&totals);
    let child_rates_norm = min_max_normalize(&child_rates);
    let demo_risks = min_max_normalize(&demo_intensities);
    let bio_risks = min_max_normalize(&bio_intensities);

    aggregates
        .iter()
        .enumerate()
        .map(|(i, aggregate)| {
            let enroll_risk = 1.0 - totals_norm[i];
            let child_risk = 1.0 - child_rates_norm[i];
            let demo_instability_risk = demo_risks[i];
            let bio_failure_risk = bio_risks[i];

            let exclusion_risk_score = weights.enroll_weight * enroll_risk
                + weights.child_weight * child_risk
                + weights.demo_weight * demo_instability_risk
                + weights.bio_weight * bio_failure_risk;

            RiskScoredRegion {
                aggregate: aggregate.clone(),
                child_enrollment_rate: child_rates[i],
                demo_update_intensity: demo_intensities[i],
                bio_update_intensity: bio_intensities[i],
                enroll_risk,
                child_risk,
                demo_instability_risk,
                bio_failure_risk,
                exclusion_risk_score,
                // Strict inequality: a score of exactly the threshold is not high-risk
                is_high_risk: exclusion_risk_score > weights.high_risk_threshold,
            }
        })
        .collect()
}
