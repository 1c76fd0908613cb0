use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{info, warn};
use risk_mapper::{PipelineConfig, Result, run_pipeline};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Base directory with the three register extracts
    let base_dir = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("data"), PathBuf::from);
    if !base_dir.exists() {
        warn!("Data directory not found: {}", base_dir.display());
        return Ok(());
    }

    info!("Loading register data from: {}", base_dir.display());

    let config = PipelineConfig {
        enrolment_dir: base_dir.join("enrolment"),
        demographic_dir: base_dir.join("demographic"),
        biometric_dir: base_dir.join("biometric"),
        model_path: Some(base_dir.join("exclusion_model.json")),
        scaler_path: Some(base_dir.join("exclusion_scaler.json")),
        ..PipelineConfig::default()
    };

    let start = Instant::now();
    let outcome = run_pipeline(&config)?;
    info!(
        "Scored {} regions in {:?} ({} raw rows dropped)",
        outcome.regions.len(),
        start.elapsed(),
        outcome.dropped_rows
    );

    info!("Top feature importances:");
    for ranked in outcome.importance.iter().take(5) {
        info!("  {}: {:.4}", ranked.feature, ranked.importance);
    }

    info!("Highest-priority regions:");
    for region in outcome.regions.iter().take(10) {
        info!(
            "  {} / {}: priority {:.1}, risk probability {:.3}",
            region.scored.aggregate.state,
            region.scored.aggregate.district,
            region.priority_score,
            region.predicted_risk_probability
        );
    }

    write_summary(&outcome, &base_dir.join("priority_regions.json"))?;

    Ok(())
}

/// Persist the prioritized table for downstream reporting tools
fn write_summary(outcome: &risk_mapper::PipelineOutcome, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &outcome.regions).map_err(|e| {
        risk_mapper::RiskMapperError::PersistenceError(format!(
            "Failed to write {}: {e}",
            path.display()
        ))
    })?;
    info!("Priority table written: {}", path.display());
    Ok(())
}
