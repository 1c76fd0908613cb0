//! Utility functions for working with register Parquet files

pub mod progress;

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};
use rayon::prelude::*;

use crate::error::{Result, RiskMapperError};

/// Validates that a directory exists and is a directory
///
/// # Errors
/// Returns an error if the directory does not exist or is not a directory
pub fn validate_directory(dir: &Path) -> Result<()> {
    if !dir.exists() || !dir.is_dir() {
        return Err(RiskMapperError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Directory does not exist: {}", dir.display()),
        )));
    }
    Ok(())
}

/// Log an operation start with consistent format
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log an operation completion with consistent format
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    items: usize,
    elapsed: Option<std::time::Duration>,
) {
    if let Some(duration) = elapsed {
        log::info!(
            "Successfully {} {} items from {} in {:?}",
            operation,
            items,
            path.display(),
            duration
        );
    } else {
        log::info!(
            "Successfully {} {} items from {}",
            operation,
            items,
            path.display()
        );
    }
}

/// Log an operation warning with consistent format
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}

/// Helper for creating a projection mask from a register schema
///
/// Register files may carry extra columns; the projection keeps only the
/// columns the register schema names. Fields absent from the file are
/// skipped with a warning so older extracts still load.
fn create_projection(
    schema: &Schema,
    file_schema: &Schema,
    parquet_schema: &parquet::schema::types::SchemaDescriptor,
) -> Option<ProjectionMask> {
    use itertools::Itertools;

    let projection: Vec<usize> = schema
        .fields()
        .iter()
        .filter_map(|f| {
            let field_name = f.name();
            match file_schema.index_of(field_name) {
                Ok(idx) => Some(idx),
                Err(_) => {
                    log_warning(
                        &format!("Field {field_name} not found in parquet file, skipping"),
                        None,
                    );
                    None
                }
            }
        })
        .collect_vec();

    if projection.is_empty() {
        log_warning(
            "No matching fields found in schema projection, reading all columns",
            None,
        );
        None
    } else {
        Some(ProjectionMask::leaves(parquet_schema, projection))
    }
}

/// Read a parquet file into Arrow record batches
///
/// # Arguments
/// * `path` - Path to the Parquet file
/// * `schema` - Optional Arrow Schema for projecting specific columns
///
/// # Errors
/// Returns an error if the file cannot be opened or if the Parquet file is invalid
pub fn read_parquet(path: &Path, schema: Option<&Schema>) -> Result<Vec<RecordBatch>> {
    let start = std::time::Instant::now();
    log_operation_start("Reading parquet file", path);

    let file = File::open(path).map_err(|e| {
        RiskMapperError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Failed to open file {}: {}", path.display(), e),
        ))
    })?;

    let reader_builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let reader = match schema {
        Some(schema) => {
            let file_schema = reader_builder.schema();
            match create_projection(schema, file_schema, reader_builder.parquet_schema()) {
                Some(mask) => reader_builder.with_projection(mask).build()?,
                None => reader_builder.build()?,
            }
        }
        None => reader_builder.build()?,
    };

    let batches = reader
        .collect::<std::result::Result<Vec<RecordBatch>, _>>()
        .map_err(RiskMapperError::from)?;

    log_operation_complete("read", path, batches.len(), Some(start.elapsed()));
    Ok(batches)
}

/// Find all Parquet files in a directory
///
/// # Errors
/// Returns an error if directory reading fails
pub fn find_parquet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    use itertools::Itertools;

    log_operation_start("Searching for parquet files in", dir);
    validate_directory(dir)?;

    let parquet_files = std::fs::read_dir(dir)
        .map_err(|e| {
            RiskMapperError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("Failed to read directory {}: {}", dir.display(), e),
            ))
        })?
        .filter_map(|entry_result| match entry_result {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && path.extension().is_some_and(|ext| ext == "parquet") {
                    Some(Ok(path))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(RiskMapperError::IoError(std::io::Error::other(
                format!("Failed to read directory entry: {e}"),
            )))),
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .sorted()
        .collect_vec();

    if parquet_files.is_empty() {
        log_warning("No Parquet files found in directory", Some(dir));
    } else {
        log_operation_complete("found", dir, parquet_files.len(), None);
    }

    Ok(parquet_files)
}

/// Load all parquet files from a directory in parallel
///
/// All batches from all files are concatenated in file order; an empty
/// directory yields an empty batch vector, not an error.
///
/// # Errors
/// Returns an error if directory reading fails or any file cannot be read
pub fn load_parquet_files_parallel(dir: &Path, schema: Option<&Schema>) -> Result<Vec<RecordBatch>> {
    let parquet_files = find_parquet_files(dir)?;

    if parquet_files.is_empty() {
        return Ok(Vec::new());
    }

    let all_batches: Vec<Result<Vec<RecordBatch>>> = parquet_files
        .par_iter()
        .map(|path| read_parquet(path, schema))
        .collect();

    let mut combined_batches = Vec::new();
    for result in all_batches {
        combined_batches.extend(result?);
    }

    log::info!(
        "Successfully loaded {} batches from {} Parquet files",
        combined_batches.len(),
        parquet_files.len()
    );

    Ok(combined_batches)
}
