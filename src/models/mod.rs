//! Domain row types for the risk-mapping pipeline
//!
//! The pipeline moves through three contractual table shapes: raw event
//! records loaded from the registers, per-region aggregates, and the two
//! widened tables produced by the feature builder and the priority scorer.
//! Widening stages embed their input row type, so base columns are never
//! rewritten once aggregated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Region identity: the unit of aggregation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionKey {
    /// State name
    pub state: String,
    /// District name within the state
    pub district: String,
}

impl RegionKey {
    /// Create a new region key
    #[must_use]
    pub fn new(state: impl Into<String>, district: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            district: district.into(),
        }
    }
}

/// One enrolment transaction from the enrolment register
#[derive(Debug, Clone, PartialEq)]
pub struct EnrolmentRecord {
    /// State name
    pub state: String,
    /// District name
    pub district: String,
    /// Postal-area code
    pub pincode: String,
    /// Event date; `None` when the source value was malformed
    pub date: Option<NaiveDate>,
    /// Enrolments in the 0-5 age bracket
    pub age_0_5: u64,
    /// Enrolments in the 5-17 age bracket
    pub age_5_17: u64,
    /// Enrolments in the 18+ age bracket
    pub age_18_plus: u64,
}

/// One update transaction from the demographic or biometric register
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRecord {
    /// State name
    pub state: String,
    /// District name
    pub district: String,
    /// Postal-area code
    pub pincode: String,
    /// Event date; `None` when the source value was malformed
    pub date: Option<NaiveDate>,
}

/// One row per unique (state, district) pair, summed over all raw events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionAggregate {
    /// State name
    pub state: String,
    /// District name
    pub district: String,
    /// Summed enrolments in the 0-5 age bracket
    pub age_0_5: u64,
    /// Summed enrolments in the 5-17 age bracket
    pub age_5_17: u64,
    /// Summed enrolments in the 18+ age bracket
    pub age_18_plus: u64,
    /// Sum of the three age brackets
    pub total_registrations: u64,
    /// Number of distinct postal areas seen in the enrolment stream
    pub pincode_count: u64,
    /// Number of demographic-update events
    pub demo_update_count: u64,
    /// Number of biometric-update events
    pub bio_update_count: u64,
}

impl RegionAggregate {
    /// Region identity for this row
    #[must_use]
    pub fn key(&self) -> RegionKey {
        RegionKey::new(self.state.clone(), self.district.clone())
    }
}

/// A region aggregate widened with derived ratios and risk scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScoredRegion {
    /// The base aggregate columns
    #[serde(flatten)]
    pub aggregate: RegionAggregate,
    /// `age_0_5 / (total_registrations + 1)`
    pub child_enrollment_rate: f64,
    /// `demo_update_count / (total_registrations + 1)`
    pub demo_update_intensity: f64,
    /// `bio_update_count / (total_registrations + 1)`
    pub bio_update_intensity: f64,
    /// `1 - normalize(total_registrations)`, in [0, 1]
    pub enroll_risk: f64,
    /// `1 - normalize(child_enrollment_rate)`, in [0, 1]
    pub child_risk: f64,
    /// `normalize(demo_update_intensity)`, in [0, 1]
    pub demo_instability_risk: f64,
    /// `normalize(bio_update_intensity)`, in [0, 1]
    pub bio_failure_risk: f64,
    /// Weighted composite of the four component risks, in [0, 1]
    pub exclusion_risk_score: f64,
    /// `exclusion_risk_score > high_risk_threshold` (strict)
    pub is_high_risk: bool,
}

/// Classifier output for one region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Probability of the region being high-risk, in [0, 1]
    pub probability: f64,
    /// Hard label derived from the probability
    pub high_risk: bool,
}

/// A risk-scored region widened with predictions, gaps and the final
/// intervention-priority score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedRegion {
    /// The risk-scored columns
    #[serde(flatten)]
    pub scored: RiskScoredRegion,
    /// Probability of high risk used by the priority formula
    pub predicted_risk_probability: f64,
    /// Hard high-risk label
    pub predicted_high_risk: bool,
    /// `max(child_enrollment_rate) - child_enrollment_rate`
    pub child_gap: f64,
    /// `max(total_registrations) - total_registrations`
    pub enrollment_gap: f64,
    /// Min-max normalized child gap, in [0, 1]
    pub child_gap_norm: f64,
    /// Min-max normalized enrollment gap, in [0, 1]
    pub enrollment_gap_norm: f64,
    /// Intervention priority, clamped to [0, 100]
    pub priority_score: f64,
}
