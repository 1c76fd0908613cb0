//! Artifact persistence
//!
//! The trained model (ensemble, feature names, imputation medians) and the
//! fitted scaler are stored as two independent JSON blobs. Loading needs
//! both paths and restores bit-identical prediction behavior; a missing or
//! corrupt file is fatal, there is no fallback to an untrained model.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RiskMapperError};

use super::gbdt::GradientBoostedClassifier;
use super::scaler::StandardScaler;
use super::trainer::TrainedModel;

/// On-disk shape of the model blob (everything except the scaler)
#[derive(Debug, Serialize, Deserialize)]
struct ModelArtifact {
    classifier: GradientBoostedClassifier,
    feature_names: Vec<String>,
    medians: Vec<f64>,
}

/// Persist a trained model as two artifact files
///
/// # Errors
/// Returns an error if either file cannot be written.
pub fn save_artifacts(model: &TrainedModel, model_path: &Path, scaler_path: &Path) -> Result<()> {
    let artifact = ModelArtifact {
        classifier: model.classifier.clone(),
        feature_names: model.feature_names.clone(),
        medians: model.medians.clone(),
    };

    write_json(&artifact, model_path)?;
    write_json(&model.scaler, scaler_path)?;

    log::info!("Model saved: {}", model_path.display());
    log::info!("Scaler saved: {}", scaler_path.display());
    Ok(())
}

/// Load a trained model from its two artifact files
///
/// # Errors
/// Returns an error if either file is missing or cannot be parsed.
pub fn load_artifacts(model_path: &Path, scaler_path: &Path) -> Result<TrainedModel> {
    let artifact: ModelArtifact = read_json(model_path)?;
    let scaler: StandardScaler = read_json(scaler_path)?;

    log::info!("Model loaded: {}", model_path.display());
    log::info!("Scaler loaded: {}", scaler_path.display());

    Ok(TrainedModel {
        classifier: artifact.classifier,
        scaler,
        feature_names: artifact.feature_names,
        medians: artifact.medians,
    })
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        RiskMapperError::PersistenceError(format!("Failed to create {}: {e}", path.display()))
    })?;
    serde_json::to_writer(BufWriter::new(file), value).map_err(|e| {
        RiskMapperError::PersistenceError(format!("Failed to write {}: {e}", path.display()))
    })
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        RiskMapperError::PersistenceError(format!("Failed to open {}: {e}", path.display()))
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        RiskMapperError::PersistenceError(format!("Failed to parse {}: {e}", path.display()))
    })
}
