//! Gradient-boosted classifier
//!
//! Staged least-squares trees fit to logistic-loss residuals: the base
//! score is the training log-odds, each round fits a tree to the current
//! residuals on a seeded row subsample, leaf values are replaced by Newton
//! estimates and shrunk by the learning rate.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::utils::progress::{create_main_progress_bar, finish_and_clear};

use super::config::GradientBoostingConfig;
use super::error::ModelError;
use super::matrix::FeatureMatrix;
use super::tree::{RegressionTree, TreeParams};

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// A fitted gradient-boosted binary classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostedClassifier {
    config: GradientBoostingConfig,
    n_features: usize,
    base_score: f64,
    trees: Vec<RegressionTree>,
    feature_importance: Vec<f64>,
}

impl GradientBoostedClassifier {
    /// Fit the ensemble on a scaled training matrix
    ///
    /// # Errors
    /// Returns an error when the matrix is empty or the labels contain a
    /// single class.
    pub fn fit(
        matrix: &FeatureMatrix,
        labels: &[bool],
        config: &GradientBoostingConfig,
    ) -> Result<Self, ModelError> {
        let n = matrix.n_rows();
        if n == 0 {
            return Err(ModelError::EmptyMatrix);
        }
        let positives = labels.iter().filter(|&&l| l).count();
        if positives == 0 || positives == n {
            return Err(ModelError::SingleClass);
        }

        let y: Vec<f64> = labels.iter().map(|&l| f64::from(u8::from(l))).collect();
        let prior = (positives as f64 / n as f64).clamp(1e-6, 1.0 - 1e-6);
        let base_score = (prior / (1.0 - prior)).ln();

        let tree_params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split,
            min_samples_leaf: config.min_samples_leaf,
        };
        let sample_size = ((n as f64 * config.subsample).ceil() as usize).clamp(1, n);
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut scores = vec![base_score; n];
        let mut trees = Vec::with_capacity(config.n_estimators);
        let mut importance_raw = vec![0.0; matrix.n_features()];

        let pb = create_main_progress_bar(config.n_estimators as u64, Some("boosting rounds"));

        for _ in 0..config.n_estimators {
            let residuals: Vec<f64> = scores
                .iter()
                .zip(&y)
                .map(|(&s, &t)| t - sigmoid(s))
                .collect();

            let rows = rand::seq::index::sample(&mut rng, n, sample_size).into_vec();

            let mut tree =
                RegressionTree::fit(matrix, &residuals, &rows, &tree_params, &mut importance_raw);

            // Newton leaf update on the subsample: gamma = sum(r) / sum(p(1-p))
            let mut numerators: FxHashMap<usize, f64> = FxHashMap::default();
            let mut denominators: FxHashMap<usize, f64> = FxHashMap::default();
            for &row in &rows {
                let leaf = tree.leaf_index(matrix, row);
                let p = sigmoid(scores[row]);
                *numerators.entry(leaf).or_insert(0.0) += residuals[row];
                *denominators.entry(leaf).or_insert(0.0) += p * (1.0 - p);
            }
            for (leaf, numerator) in numerators {
                let denominator = denominators[&leaf].max(1e-12);
                tree.set_leaf_value(leaf, numerator / denominator);
            }

            for (row, score) in scores.iter_mut().enumerate() {
                *score += config.learning_rate * tree.predict_row(matrix, row);
            }

            trees.push(tree);
            pb.inc(1);
        }
        finish_and_clear(&pb);

        // Normalize split-gain totals so importances sum to 1
        let total_gain: f64 = importance_raw.iter().sum();
        let feature_importance = if total_gain > 0.0 {
            importance_raw.iter().map(|g| g / total_gain).collect()
        } else {
            importance_raw
        };

        Ok(Self {
            config: config.clone(),
            n_features: matrix.n_features(),
            base_score,
            trees,
            feature_importance,
        })
    }

    /// Raw additive score (log-odds) for one row
    fn predict_raw(&self, matrix: &FeatureMatrix, row: usize) -> f64 {
        self.base_score
            + self.config.learning_rate
                * self
                    .trees
                    .iter()
                    .map(|tree| tree.predict_row(matrix, row))
                    .sum::<f64>()
    }

    /// Probability of the positive (high-risk) class per row
    ///
    /// # Errors
    /// Returns an error when the matrix width does not match the fit.
    pub fn predict_proba(&self, matrix: &FeatureMatrix) -> Result<Vec<f64>, ModelError> {
        if matrix.n_features() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                actual: matrix.n_features(),
            });
        }
        Ok((0..matrix.n_rows())
            .map(|row| sigmoid(self.predict_raw(matrix, row)))
            .collect())
    }

    /// Hard labels per row (probability >= 0.5)
    ///
    /// # Errors
    /// Returns an error when the matrix width does not match the fit.
    pub fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<bool>, ModelError> {
        Ok(self
            .predict_proba(matrix)?
            .into_iter()
            .map(|p| p >= 0.5)
            .collect())
    }

    /// Normalized per-feature split-gain totals, in training column order
    #[must_use]
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable_fixture() -> (FeatureMatrix, Vec<bool>) {
        let x: Vec<f64> = (0..40).map(f64::from).collect();
        let noise: Vec<f64> = (0..40).map(|i| f64::from(i % 3)).collect();
        let labels: Vec<bool> = (0..40).map(|i| i >= 20).collect();
        (
            FeatureMatrix::new(
                vec!["signal".to_string(), "noise".to_string()],
                vec![x, noise],
            ),
            labels,
        )
    }

    fn small_config() -> GradientBoostingConfig {
        GradientBoostingConfig {
            n_estimators: 25,
            max_depth: 2,
            min_samples_split: 4,
            min_samples_leaf: 2,
            ..GradientBoostingConfig::default()
        }
    }

    #[test]
    fn learns_a_separable_boundary() {
        let (matrix, labels) = separable_fixture();
        let clf = GradientBoostedClassifier::fit(&matrix, &labels, &small_config()).unwrap();

        let proba = clf.predict_proba(&matrix).unwrap();
        assert!(proba[0] < 0.5);
        assert!(proba[39] > 0.5);

        let predictions = clf.predict(&matrix).unwrap();
        assert_eq!(predictions, labels);
    }

    #[test]
    fn importance_favors_the_signal_feature() {
        let (matrix, labels) = separable_fixture();
        let clf = GradientBoostedClassifier::fit(&matrix, &labels, &small_config()).unwrap();

        let importances = clf.feature_importances();
        assert!(importances[0] > importances[1]);
        assert!((importances.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn same_seed_is_reproducible() {
        let (matrix, labels) = separable_fixture();
        let a = GradientBoostedClassifier::fit(&matrix, &labels, &small_config()).unwrap();
        let b = GradientBoostedClassifier::fit(&matrix, &labels, &small_config()).unwrap();
        assert_eq!(
            a.predict_proba(&matrix).unwrap(),
            b.predict_proba(&matrix).unwrap()
        );
    }

    #[test]
    fn single_class_labels_are_rejected() {
        let (matrix, _) = separable_fixture();
        let labels = vec![true; 40];
        assert!(matches!(
            GradientBoostedClassifier::fit(&matrix, &labels, &small_config()),
            Err(ModelError::SingleClass)
        ));
    }
}
