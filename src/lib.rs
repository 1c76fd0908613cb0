//! A Rust library for mapping identity-registration exclusion risk from
//! administrative register data: regional aggregation, composite risk
//! scoring, a gradient-boosted risk classifier and intervention
//! prioritization.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod model;
pub mod models;
pub mod pipeline;
pub mod registry;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{PipelineConfig, PriorityWeights, RiskWeights};
pub use error::{Result, RiskMapperError};
pub use models::{
    EnrolmentRecord, Prediction, PrioritizedRegion, RegionAggregate, RegionKey, RiskScoredRegion,
    UpdateRecord,
};

// Pipeline stages
pub use algorithm::{PredictionSource, aggregate_regions, build_risk_features, prioritize_regions};
pub use pipeline::{PipelineOutcome, run_pipeline, score_with_model};

// Classifier
pub use model::{
    EvaluationMetrics, FEATURE_COLUMNS, GradientBoostingConfig, ModelError, RankedFeature,
    TrainedModel, TrainingOutcome, load_artifacts, save_artifacts, train_risk_classifier,
};

// Register loading
pub use registry::{EnrolmentRegister, LoadOutcome, RegisterReader, UpdateRegister};

// Utility functions
pub use utils::{load_parquet_files_parallel, read_parquet};
