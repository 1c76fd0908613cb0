//! Intervention priority scoring
//!
//! Combines classifier predictions (or, explicitly, the composite risk
//! score when no model output exists) with normalized gap metrics into a
//! bounded 0-100 priority score per region.

use crate::config::PriorityWeights;
use crate::error::{Result, RiskMapperError};
use crate::models::{Prediction, PrioritizedRegion, RiskScoredRegion};

use super::features::min_max_normalize;

/// Where the priority formula takes its risk probability from
///
/// The caller states the source explicitly; the scorer never probes table
/// shape at runtime.
#[derive(Debug, Clone, Copy)]
pub enum PredictionSource<'a> {
    /// Classifier predictions, aligned by index with the region table
    Model(&'a [Prediction]),
    /// No predictions available: substitute `exclusion_risk_score` with
    /// identical weights
    FallbackScore,
}

/// Compute intervention priority for every region
///
/// The weighted sum is multiplied by 100 and clamped to [0, 100]; clamping
/// is mandatory even when the arithmetic cannot exceed the range.
///
/// # Errors
/// Returns an error when `PredictionSource::Model` predictions are not
/// aligned with the region table.
pub fn prioritize_regions(
    regions: &[RiskScoredRegion],
    source: PredictionSource<'_>,
    weights: &PriorityWeights,
) -> Result<Vec<PrioritizedRegion>> {
    if let PredictionSource::Model(predictions) = source {
        if predictions.len() != regions.len() {
            return Err(RiskMapperError::InvalidInput(format!(
                "{} predictions for {} regions",
                predictions.len(),
                regions.len()
            )));
        }
    }

    let max_child_rate = regions
        .iter()
        .map(|r| r.child_enrollment_rate)
        .fold(f64::NEG_INFINITY, f64::max);
    let max_total = regions
        .iter()
        .map(|r| r.aggregate.total_registrations as f64)
        .fold(f64::NEG_INFINITY, f64::max);

    let child_gaps: Vec<f64> = regions
        .iter()
        .map(|r| max_child_rate - r.child_enrollment_rate)
        .collect();
    let enrollment_gaps: Vec<f64> = regions
        .iter()
        .map(|r| max_total - r.aggregate.total_registrations as f64)
        .collect();

    let child_gaps_norm = min_max_normalize(&child_gaps);
    let enrollment_gaps_norm = min_max_normalize(&enrollment_gaps);

    let prioritized = regions
        .iter()
        .enumerate()
        .map(|(i, region)| {
            let (probability, high_risk) = match source {
                PredictionSource::Model(predictions) => {
                    (predictions[i].probability, predictions[i].high_risk)
                }
                PredictionSource::FallbackScore => {
                    (region.exclusion_risk_score, region.is_high_risk)
                }
            };

            let weighted = weights.probability_weight * probability
                + weights.child_gap_weight * child_gaps_norm[i]
                + weights.demo_weight * region.demo_instability_risk
                + weights.bio_weight * region.bio_failure_risk;
            let priority_score = (weighted * 100.0).clamp(0.0, 100.0);

            PrioritizedRegion {
                scored: region.clone(),
                predicted_risk_probability: probability,
                predicted_high_risk: high_risk,
                child_gap: child_gaps[i],
                enrollment_gap: enrollment_gaps[i],
                child_gap_norm: child_gaps_norm[i],
                enrollment_gap_norm: enrollment_gaps_norm[i],
                priority_score,
            }
        })
        .collect();

    Ok(prioritized)
}
