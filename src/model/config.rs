//! Classifier hyperparameters

use serde::{Deserialize, Serialize};

/// Hyperparameters for the gradient-boosted classifier
///
/// Defaults are tuned for sparse regional tables: moderate depth and
/// ensemble size, shrinkage and row subsampling against overfitting, and
/// minimum-sample thresholds so single thin regions cannot dominate splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostingConfig {
    /// Number of boosting rounds (trees)
    pub n_estimators: usize,
    /// Shrinkage applied to each tree's contribution
    pub learning_rate: f64,
    /// Maximum tree depth
    pub max_depth: usize,
    /// Minimum samples a node needs before it may split
    pub min_samples_split: usize,
    /// Minimum samples each child of a split must keep
    pub min_samples_leaf: usize,
    /// Fraction of rows sampled (without replacement) per round
    pub subsample: f64,
    /// Seed controlling subsampling and data splits
    pub seed: u64,
}

impl Default for GradientBoostingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 200,
            learning_rate: 0.1,
            max_depth: 5,
            min_samples_split: 20,
            min_samples_leaf: 10,
            subsample: 0.8,
            seed: 42,
        }
    }
}
