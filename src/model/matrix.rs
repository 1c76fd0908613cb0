//! Feature matrix construction and imputation
//!
//! The classifier consumes a column-major `f64` matrix with an ordered
//! list of feature names. The fixed 10-column feature set is derived from
//! a risk-scored region table; a matrix built elsewhere must carry the
//! same names in the same order to be accepted by a trained model.

use crate::models::RiskScoredRegion;

/// The ordered feature columns the classifier is trained on
pub const FEATURE_COLUMNS: [&str; 10] = [
    "total_registrations",
    "age_0_5",
    "age_5_17",
    "age_18_plus",
    "child_enrollment_rate",
    "demo_update_count",
    "bio_update_count",
    "demo_update_intensity",
    "bio_update_intensity",
    "pincode_count",
];

/// Column-major feature matrix with named columns
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    feature_names: Vec<String>,
    columns: Vec<Vec<f64>>,
    n_rows: usize,
}

impl FeatureMatrix {
    /// Build a matrix from named columns
    ///
    /// All columns must have the same length; callers construct via
    /// [`FeatureMatrix::from_regions`] in the normal pipeline.
    #[must_use]
    pub fn new(feature_names: Vec<String>, columns: Vec<Vec<f64>>) -> Self {
        let n_rows = columns.first().map_or(0, Vec::len);
        debug_assert!(columns.iter().all(|c| c.len() == n_rows));
        Self {
            feature_names,
            columns,
            n_rows,
        }
    }

    /// Extract the fixed feature set from a risk-scored region table
    #[must_use]
    pub fn from_regions(regions: &[RiskScoredRegion]) -> Self {
        let columns = vec![
            regions
                .iter()
                .map(|r| r.aggregate.total_registrations as f64)
                .collect(),
            regions.iter().map(|r| r.aggregate.age_0_5 as f64).collect(),
            regions
                .iter()
                .map(|r| r.aggregate.age_5_17 as f64)
                .collect(),
            regions
                .iter()
                .map(|r| r.aggregate.age_18_plus as f64)
                .collect(),
            regions.iter().map(|r| r.child_enrollment_rate).collect(),
            regions
                .iter()
                .map(|r| r.aggregate.demo_update_count as f64)
                .collect(),
            regions
                .iter()
                .map(|r| r.aggregate.bio_update_count as f64)
                .collect(),
            regions.iter().map(|r| r.demo_update_intensity).collect(),
            regions.iter().map(|r| r.bio_update_intensity).collect(),
            regions
                .iter()
                .map(|r| r.aggregate.pincode_count as f64)
                .collect(),
        ];

        Self::new(
            FEATURE_COLUMNS.iter().map(ToString::to_string).collect(),
            columns,
        )
    }

    /// High-risk labels aligned with [`FeatureMatrix::from_regions`]
    #[must_use]
    pub fn high_risk_labels(regions: &[RiskScoredRegion]) -> Vec<bool> {
        regions.iter().map(|r| r.is_high_risk).collect()
    }

    /// Number of rows
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of feature columns
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.columns.len()
    }

    /// Ordered feature names
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// One cell value
    #[must_use]
    pub fn value(&self, row: usize, column: usize) -> f64 {
        self.columns[column][row]
    }

    /// One full column
    #[must_use]
    pub fn column(&self, column: usize) -> &[f64] {
        &self.columns[column]
    }

    /// A new matrix containing only the given rows, in the given order
    #[must_use]
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|col| rows.iter().map(|&r| col[r]).collect())
            .collect();
        Self::new(self.feature_names.clone(), columns)
    }

    /// Per-column medians, ignoring NaN cells
    ///
    /// A column with no finite values yields a median of 0.0.
    #[must_use]
    pub fn column_medians(&self) -> Vec<f64> {
        self.columns
            .iter()
            .map(|col| {
                let mut finite: Vec<f64> = col.iter().copied().filter(|v| !v.is_nan()).collect();
                if finite.is_empty() {
                    return 0.0;
                }
                finite.sort_by(f64::total_cmp);
                let mid = finite.len() / 2;
                if finite.len() % 2 == 0 {
                    (finite[mid - 1] + finite[mid]) / 2.0
                } else {
                    finite[mid]
                }
            })
            .collect()
    }

    /// Replace NaN cells with the given per-column fill values
    pub fn impute(&mut self, fill_values: &[f64]) {
        for (column, fill) in self.columns.iter_mut().zip(fill_values) {
            for cell in column.iter_mut() {
                if cell.is_nan() {
                    *cell = *fill;
                }
            }
        }
    }
}
