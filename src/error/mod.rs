//! Error handling for the risk mapper.

use std::{fmt, io};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

use crate::model::ModelError;

/// Specialized error type for risk-mapping operations
#[derive(Debug)]
pub enum RiskMapperError {
    /// Error opening or reading a file
    IoError(io::Error),
    /// Error processing Parquet data
    ParquetError(ParquetError),
    /// Error processing Arrow data
    ArrowError(ArrowError),
    /// A required column is missing or has the wrong type
    ColumnError(String),
    /// Error raised by the risk classifier
    ModelError(ModelError),
    /// Error saving or loading a persisted artifact
    PersistenceError(String),
    /// Inputs that cannot be combined (e.g. mismatched table lengths)
    InvalidInput(String),
}

impl From<io::Error> for RiskMapperError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error)
    }
}

impl From<ParquetError> for RiskMapperError {
    fn from(error: ParquetError) -> Self {
        Self::ParquetError(error)
    }
}

impl From<ArrowError> for RiskMapperError {
    fn from(error: ArrowError) -> Self {
        Self::ArrowError(error)
    }
}

impl From<ModelError> for RiskMapperError {
    fn from(error: ModelError) -> Self {
        Self::ModelError(error)
    }
}

impl fmt::Display for RiskMapperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::ParquetError(e) => write!(f, "Parquet error: {e}"),
            Self::ArrowError(e) => write!(f, "Arrow error: {e}"),
            Self::ColumnError(msg) => write!(f, "Column error: {msg}"),
            Self::ModelError(e) => write!(f, "Model error: {e}"),
            Self::PersistenceError(msg) => write!(f, "Persistence error: {msg}"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
        }
    }
}

impl std::error::Error for RiskMapperError {}

/// Result type for risk-mapping operations
pub type Result<T> = std::result::Result<T, RiskMapperError>;
