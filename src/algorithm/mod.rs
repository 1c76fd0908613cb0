//! Core algorithms: aggregation, risk feature engineering and prioritization

pub mod aggregate;
pub mod features;
pub mod priority;

pub use aggregate::aggregate_regions;
pub use features::{build_risk_features, min_max_normalize};
pub use priority::{PredictionSource, prioritize_regions};
