//! Classifier training and inference orchestration
//!
//! Splits a risk-scored region table, fits imputation medians and the
//! scaler on the training partition only, trains the boosted ensemble and
//! evaluates it on the held-out partition plus cross-validated ROC-AUC.

use serde::{Deserialize, Serialize};

use crate::models::{Prediction, RiskScoredRegion};

use super::config::GradientBoostingConfig;
use super::error::ModelError;
use super::gbdt::GradientBoostedClassifier;
use super::matrix::FeatureMatrix;
use super::metrics::{self, EvaluationMetrics};
use super::scaler::StandardScaler;
use super::split::{stratified_k_fold, stratified_split};

/// Number of cross-validation folds run on the training partition
pub const CV_FOLDS: usize = 5;

/// A trained classifier artifact
///
/// Immutable after fitting: the scaler and the imputation medians are fit
/// on the training partition and reapplied unmodified to any table scored
/// later, so predictions are reproducible across runs and processes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    /// The boosted ensemble
    pub classifier: GradientBoostedClassifier,
    /// Standardization transform fit on the training partition
    pub scaler: StandardScaler,
    /// Ordered feature names the model expects
    pub feature_names: Vec<String>,
    /// Per-column imputation medians from the training partition
    pub medians: Vec<f64>,
}

impl TrainedModel {
    /// Predict probability and hard label for every row of a feature matrix
    ///
    /// The matrix must carry exactly the feature columns the model was
    /// trained on, in order; anything else is a configuration error.
    ///
    /// # Errors
    /// Returns an error on mismatched feature columns.
    pub fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<Prediction>, ModelError> {
        if matrix.feature_names() != self.feature_names.as_slice() {
            return Err(ModelError::FeatureMismatch {
                expected: self.feature_names.clone(),
                actual: matrix.feature_names().to_vec(),
            });
        }

        let mut imputed = matrix.clone();
        imputed.impute(&self.medians);
        let scaled = self.scaler.transform(&imputed)?;
        let probabilities = self.classifier.predict_proba(&scaled)?;

        Ok(probabilities
            .into_iter()
            .map(|probability| Prediction {
                probability,
                high_risk: probability >= 0.5,
            })
            .collect())
    }

    /// Predict for every region of a risk-scored table
    ///
    /// # Errors
    /// Returns an error on mismatched feature columns.
    pub fn predict_regions(
        &self,
        regions: &[RiskScoredRegion],
    ) -> Result<Vec<Prediction>, ModelError> {
        self.predict(&FeatureMatrix::from_regions(regions))
    }
}

/// One feature with its importance, for ranked reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFeature {
    /// Feature column name
    pub feature: String,
    /// Normalized importance
    pub importance: f64,
}

/// Everything produced by one training run
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// The fitted artifact
    pub model: TrainedModel,
    /// Held-out and cross-validated evaluation results
    pub metrics: EvaluationMetrics,
    /// Feature importances, sorted descending
    pub importance: Vec<RankedFeature>,
}

/// Train the exclusion-risk classifier on a risk-scored region table
///
/// # Errors
/// Returns an error when the table is empty, contains a single class, or
/// is too small to split.
pub fn train_risk_classifier(
    regions: &[RiskScoredRegion],
    config: &GradientBoostingConfig,
    test_size: f64,
) -> Result<TrainingOutcome, ModelError> {
    let matrix = FeatureMatrix::from_regions(regions);
    let labels = FeatureMatrix::high_risk_labels(regions);
    if matrix.n_rows() == 0 {
        return Err(ModelError::EmptyMatrix);
    }

    let (train_idx, test_idx) = stratified_split(&labels, test_size, config.seed)?;
    let train_labels: Vec<bool> = train_idx.iter().map(|&i| labels[i]).collect();
    let test_labels: Vec<bool> = test_idx.iter().map(|&i| labels[i]).collect();

    let mut train_matrix = matrix.select_rows(&train_idx);
    let mut test_matrix = matrix.select_rows(&test_idx);

    // Medians come from the training partition only and travel with the model
    let medians = train_matrix.column_medians();
    train_matrix.impute(&medians);
    test_matrix.impute(&medians);

    let scaler = StandardScaler::fit(&train_matrix);
    let train_scaled = scaler.transform(&train_matrix)?;
    let test_scaled = scaler.transform(&test_matrix)?;

    log::info!(
        "Training classifier on {} regions ({} held out)",
        train_idx.len(),
        test_idx.len()
    );
    let classifier = GradientBoostedClassifier::fit(&train_scaled, &train_labels, config)?;

    let test_proba = classifier.predict_proba(&test_scaled)?;
    let test_pred = classifier.predict(&test_scaled)?;
    let roc_auc = metrics::roc_auc(&test_labels, &test_proba).unwrap_or_else(|| {
        log::warn!("ROC-AUC undefined on the test partition (single class)");
        f64::NAN
    });

    let (cv_auc_mean, cv_auc_std) = cross_validated_auc(&train_scaled, &train_labels, config);

    let evaluation = EvaluationMetrics {
        accuracy: metrics::accuracy(&test_labels, &test_pred),
        precision: metrics::precision(&test_labels, &test_pred),
        recall: metrics::recall(&test_labels, &test_pred),
        f1: metrics::f1_score(&test_labels, &test_pred),
        roc_auc,
        cv_auc_mean,
        cv_auc_std,
    };

    let mut importance: Vec<RankedFeature> = matrix
        .feature_names()
        .iter()
        .zip(classifier.feature_importances())
        .map(|(feature, &importance)| RankedFeature {
            feature: feature.clone(),
            importance,
        })
        .collect();
    importance.sort_by(|a, b| b.importance.total_cmp(&a.importance));

    Ok(TrainingOutcome {
        model: TrainedModel {
            classifier,
            scaler,
            feature_names: matrix.feature_names().to_vec(),
            medians,
        },
        metrics: evaluation,
        importance,
    })
}

/// Stratified k-fold ROC-AUC over the (already scaled) training partition
///
/// Folds where training or scoring is undefined (a single class on either
/// side) are skipped with a warning. Returns (NaN, NaN) when no fold
/// produced a score.
fn cross_validated_auc(
    train_scaled: &FeatureMatrix,
    train_labels: &[bool],
    config: &GradientBoostingConfig,
) -> (f64, f64) {
    let folds = stratified_k_fold(train_labels, CV_FOLDS, config.seed);
    let mut aucs = Vec::new();

    for fold in &folds {
        let mut in_fold = vec![false; train_labels.len()];
        for &i in fold {
            in_fold[i] = true;
        }
        let cv_train: Vec<usize> = (0..train_labels.len()).filter(|&i| !in_fold[i]).collect();

        let cv_train_labels: Vec<bool> = cv_train.iter().map(|&i| train_labels[i]).collect();
        let fold_labels: Vec<bool> = fold.iter().map(|&i| train_labels[i]).collect();

        let fitted = GradientBoostedClassifier::fit(
            &train_scaled.select_rows(&cv_train),
            &cv_train_labels,
            config,
        );
        let Ok(fitted) = fitted else {
            log::warn!("Skipping cross-validation fold with a single class");
            continue;
        };

        match fitted.predict_proba(&train_scaled.select_rows(fold)) {
            Ok(fold_proba) => match metrics::roc_auc(&fold_labels, &fold_proba) {
                Some(auc) => aucs.push(auc),
                None => log::warn!("ROC-AUC undefined on a cross-validation fold"),
            },
            Err(e) => log::warn!("Cross-validation scoring failed: {e}"),
        }
    }

    if aucs.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let mean = aucs.iter().sum::<f64>() / aucs.len() as f64;
    let variance = aucs.iter().map(|a| (a - mean).powi(2)).sum::<f64>() / aucs.len() as f64;
    (mean, variance.sqrt())
}
