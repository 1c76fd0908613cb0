//! Feature standardization
//!
//! Zero-mean, unit-variance scaling fit once on the training split. The
//! fitted transform is part of the persisted artifact and is reapplied
//! unmodified at inference; it is never refit on inference data.

use serde::{Deserialize, Serialize};

use super::error::ModelError;
use super::matrix::FeatureMatrix;

/// Fitted standardization transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Fit means and standard deviations per column
    ///
    /// Zero-variance columns keep a scale of 1.0 so they pass through
    /// centered instead of dividing by zero.
    #[must_use]
    pub fn fit(matrix: &FeatureMatrix) -> Self {
        let n = matrix.n_rows() as f64;
        let mut means = Vec::with_capacity(matrix.n_features());
        let mut stds = Vec::with_capacity(matrix.n_features());

        for j in 0..matrix.n_features() {
            let column = matrix.column(j);
            let mean = if n > 0.0 {
                column.iter().sum::<f64>() / n
            } else {
                0.0
            };
            let variance = if n > 0.0 {
                column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
            } else {
                0.0
            };
            let std = variance.sqrt();
            means.push(mean);
            stds.push(if std > 0.0 { std } else { 1.0 });
        }

        Self { means, stds }
    }

    /// Apply the fitted transform to a matrix
    ///
    /// # Errors
    /// Returns an error when the column count does not match the fit.
    pub fn transform(&self, matrix: &FeatureMatrix) -> Result<FeatureMatrix, ModelError> {
        if matrix.n_features() != self.means.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.means.len(),
                actual: matrix.n_features(),
            });
        }

        let columns = (0..matrix.n_features())
            .map(|j| {
                matrix
                    .column(j)
                    .iter()
                    .map(|v| (v - self.means[j]) / self.stds[j])
                    .collect()
            })
            .collect();

        Ok(FeatureMatrix::new(matrix.feature_names().to_vec(), columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_centers_and_scales() {
        let matrix = FeatureMatrix::new(
            vec!["a".to_string()],
            vec![vec![1.0, 2.0, 3.0]],
        );
        let scaler = StandardScaler::fit(&matrix);
        let scaled = scaler.transform(&matrix).unwrap();

        let sum: f64 = scaled.column(0).iter().sum();
        assert!(sum.abs() < 1e-12);
    }

    #[test]
    fn zero_variance_column_passes_through_centered() {
        let matrix = FeatureMatrix::new(
            vec!["a".to_string()],
            vec![vec![4.0, 4.0]],
        );
        let scaler = StandardScaler::fit(&matrix);
        let scaled = scaler.transform(&matrix).unwrap();
        assert_eq!(scaled.column(0), &[0.0, 0.0]);
    }

    #[test]
    fn transform_rejects_mismatched_width() {
        let fit_matrix = FeatureMatrix::new(vec!["a".to_string()], vec![vec![1.0]]);
        let other = FeatureMatrix::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![1.0], vec![2.0]],
        );
        let scaler = StandardScaler::fit(&fit_matrix);
        assert!(matches!(
            scaler.transform(&other),
            Err(ModelError::DimensionMismatch { .. })
        ));
    }
}
