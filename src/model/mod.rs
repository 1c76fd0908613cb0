//! Exclusion-risk classifier
//!
//! Gradient-boosted decision trees for binary classification over a fixed
//! ordered feature vector, with median imputation, standard scaling,
//! stratified evaluation and JSON artifact persistence.

pub mod config;
pub mod error;
pub mod gbdt;
pub mod matrix;
pub mod metrics;
pub mod persist;
pub mod scaler;
pub mod split;
pub mod trainer;
pub mod tree;

pub use config::GradientBoostingConfig;
pub use error::ModelError;
pub use gbdt::GradientBoostedClassifier;
pub use matrix::{FEATURE_COLUMNS, FeatureMatrix};
pub use metrics::EvaluationMetrics;
pub use persist::{load_artifacts, save_artifacts};
pub use scaler::StandardScaler;
pub use split::{stratified_k_fold, stratified_split};
pub use trainer::{RankedFeature, TrainedModel, TrainingOutcome, train_risk_classifier};
