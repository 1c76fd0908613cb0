//! Classifier error type

/// Errors raised while training or applying the risk classifier
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The feature matrix has no rows
    #[error("feature matrix is empty")]
    EmptyMatrix,

    /// Training labels contain only one class
    #[error("training labels contain a single class; both classes are required")]
    SingleClass,

    /// Too few samples to produce non-empty train and test partitions
    #[error("not enough samples to split: {0}")]
    TooFewSamples(usize),

    /// The caller's feature columns do not match what the model was trained on
    #[error("feature columns do not match the trained model: expected {expected:?}, got {actual:?}")]
    FeatureMismatch {
        /// Feature names the model was fitted with, in order
        expected: Vec<String>,
        /// Feature names the caller supplied, in order
        actual: Vec<String>,
    },

    /// A matrix has the wrong number of columns for this transform
    #[error("feature matrix has {actual} columns, expected {expected}")]
    DimensionMismatch {
        /// Expected column count
        expected: usize,
        /// Actual column count
        actual: usize,
    },
}
