//! Configuration for the risk-mapping pipeline
//!
//! Every weight and threshold used by the scoring formulas is a named field
//! here, so a run can swap weighting schemes without code edits.

use std::fmt;
use std::path::PathBuf;

use crate::model::GradientBoostingConfig;

/// Weights for the composite exclusion risk score
#[derive(Debug, Clone, PartialEq)]
pub struct RiskWeights {
    /// Weight of `enroll_risk` in the composite
    pub enroll_weight: f64,
    /// Weight of `child_risk` in the composite
    pub child_weight: f64,
    /// Weight of `demo_instability_risk` in the composite
    pub demo_weight: f64,
    /// Weight of `bio_failure_risk` in the composite
    pub bio_weight: f64,
    /// Composite scores strictly above this are labeled high-risk
    pub high_risk_threshold: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            enroll_weight: 0.35,
            child_weight: 0.25,
            demo_weight: 0.20,
            bio_weight: 0.20,
            high_risk_threshold: 0.50,
        }
    }
}

/// Weights for the intervention-priority formula
///
/// The weighted sum is multiplied by 100 and clamped to [0, 100] afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityWeights {
    /// Weight of the predicted risk probability (or its fallback)
    pub probability_weight: f64,
    /// Weight of the normalized child enrollment gap
    pub child_gap_weight: f64,
    /// Weight of the demographic instability risk
    pub demo_weight: f64,
    /// Weight of the biometric failure risk
    pub bio_weight: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            probability_weight: 40.0,
            child_gap_weight: 30.0,
            demo_weight: 20.0,
            bio_weight: 10.0,
        }
    }
}

/// Configuration for a full pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory containing the enrolment register parquet files
    pub enrolment_dir: PathBuf,
    /// Directory containing the demographic-update register parquet files
    pub demographic_dir: PathBuf,
    /// Directory containing the biometric-update register parquet files
    pub biometric_dir: PathBuf,
    /// Weights for the composite exclusion risk score
    pub weights: RiskWeights,
    /// Weights for the priority formula
    pub priority: PriorityWeights,
    /// Classifier hyperparameters
    pub model: GradientBoostingConfig,
    /// Fraction of regions held out for evaluation
    pub test_size: f64,
    /// Where to persist the trained model artifact, if anywhere
    pub model_path: Option<PathBuf>,
    /// Where to persist the fitted scaler artifact, if anywhere
    pub scaler_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enrolment_dir: PathBuf::from("data/enrolment"),
            demographic_dir: PathBuf::from("data/demographic"),
            biometric_dir: PathBuf::from("data/biometric"),
            weights: RiskWeights::default(),
            priority: PriorityWeights::default(),
            model: GradientBoostingConfig::default(),
            test_size: 0.2,
            model_path: None,
            scaler_path: None,
        }
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Configuration:")?;
        writeln!(f, "  Enrolment Register: {}", self.enrolment_dir.display())?;
        writeln!(
            f,
            "  Demographic Register: {}",
            self.demographic_dir.display()
        )?;
        writeln!(f, "  Biometric Register: {}", self.biometric_dir.display())?;
        writeln!(
            f,
            "  Risk Weights: enroll={} child={} demo={} bio={}",
            self.weights.enroll_weight,
            self.weights.child_weight,
            self.weights.demo_weight,
            self.weights.bio_weight
        )?;
        writeln!(
            f,
            "  High-Risk Threshold: {}",
            self.weights.high_risk_threshold
        )?;
        writeln!(f, "  Test Fraction: {}", self.test_size)?;
        writeln!(f, "  Boosting Rounds: {}", self.model.n_estimators)?;
        if let Some(path) = &self.model_path {
            writeln!(f, "  Model Artifact: {}", path.display())?;
        }
        if let Some(path) = &self.scaler_path {
            writeln!(f, "  Scaler Artifact: {}", path.display())?;
        }
        Ok(())
    }
}
