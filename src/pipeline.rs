//! End-to-end pipeline orchestration
//!
//! Data flows one way through the stages: raw records, region aggregates,
//! risk-scored regions, classifier predictions, prioritized regions. Each
//! stage returns a fresh table; nothing mutates upstream tables.

use crate::algorithm::{PredictionSource, aggregate_regions, build_risk_features,
                       prioritize_regions};
use crate::config::{PipelineConfig, PriorityWeights, RiskWeights};
use crate::error::Result;
use crate::model::{EvaluationMetrics, RankedFeature, TrainedModel, save_artifacts,
                   train_risk_classifier};
use crate::models::{PrioritizedRegion, RegionAggregate};
use crate::registry::{EnrolmentRegister, RegisterReader, UpdateRegister};

/// Everything produced by one end-to-end run
#[derive(Debug)]
pub struct PipelineOutcome {
    /// The per-region aggregate table
    pub aggregates: Vec<RegionAggregate>,
    /// The final prioritized table, sorted by descending priority
    pub regions: Vec<PrioritizedRegion>,
    /// Held-out evaluation of the trained classifier
    pub metrics: EvaluationMetrics,
    /// Feature importances, sorted descending
    pub importance: Vec<RankedFeature>,
    /// The trained model (also persisted when the config names paths)
    pub model: TrainedModel,
    /// Raw rows dropped during ingestion for missing critical fields
    pub dropped_rows: usize,
}

/// Run the full pipeline: load, aggregate, score, train, prioritize
///
/// # Errors
/// Returns an error on ingestion failures, on classifier training failures
/// (empty or single-class tables), or when persisting artifacts fails.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutcome> {
    log::info!("{config}");

    let enrolment = EnrolmentRegister::new().load(&config.enrolment_dir)?;
    let demographic = UpdateRegister::demographic().load(&config.demographic_dir)?;
    let biometric = UpdateRegister::biometric().load(&config.biometric_dir)?;
    let dropped_rows = enrolment.dropped_rows + demographic.dropped_rows + biometric.dropped_rows;

    let aggregates = aggregate_regions(
        &enrolment.records,
        &demographic.records,
        &biometric.records,
    );
    let scored = build_risk_features(&aggregates, &config.weights);

    let training = train_risk_classifier(&scored, &config.model, config.test_size)?;
    log::info!("{}", training.metrics);

    if let (Some(model_path), Some(scaler_path)) = (&config.model_path, &config.scaler_path) {
        save_artifacts(&training.model, model_path, scaler_path)?;
    }

    let predictions = training.model.predict_regions(&scored)?;
    let mut regions = prioritize_regions(
        &scored,
        PredictionSource::Model(&predictions),
        &config.priority,
    )?;
    regions.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));

    Ok(PipelineOutcome {
        aggregates,
        regions,
        metrics: training.metrics,
        importance: training.importance,
        model: training.model,
        dropped_rows,
    })
}

/// Score a fresh aggregate table with a previously trained model
///
/// No training happens here: the model's scaler and imputation medians are
/// reapplied as fitted. Useful for scoring new aggregation runs against a
/// persisted artifact.
///
/// # Errors
/// Returns an error when the model rejects the feature table.
pub fn score_with_model(
    aggregates: &[RegionAggregate],
    model: &TrainedModel,
    weights: &RiskWeights,
    priority: &PriorityWeights,
) -> Result<Vec<PrioritizedRegion>> {
    let scored = build_risk_features(aggregates, weights);
    let predictions = model.predict_regions(&scored)?;
    let mut regions = prioritize_regions(&scored, PredictionSource::Model(&predictions), priority)?;
    regions.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
    Ok(regions)
}
