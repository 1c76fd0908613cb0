//! Register loaders for the three raw event collections
//!
//! Each register owns its Arrow schema and knows how to turn the record
//! batches read from a directory of parquet files into typed event records.
//! Text fields are standardized (trimmed, title-cased) and rows missing a
//! critical field (state, district or a parseable date) are dropped; the
//! number of dropped rows is surfaced to the caller as a non-fatal count.

pub mod enrolment;
pub mod schemas;
pub mod updates;

use std::path::Path;

use arrow::array::{Array, Int64Array, StringArray};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;

use crate::error::{Result, RiskMapperError};

pub use enrolment::EnrolmentRegister;
pub use updates::UpdateRegister;

/// Date format used by all register extracts
pub const REGISTER_DATE_FORMAT: &str = "%d-%m-%Y";

/// Outcome of loading one register
#[derive(Debug, Clone)]
pub struct LoadOutcome<T> {
    /// Parsed records, in file order
    pub records: Vec<T>,
    /// Rows dropped because a critical field was missing or malformed
    pub dropped_rows: usize,
}

/// Common interface over the three registers
pub trait RegisterReader {
    /// The record type this register produces
    type Record;

    /// Get the name of the register
    fn register_name(&self) -> &'static str;

    /// Get the schema for this register
    fn schema(&self) -> SchemaRef;

    /// Load and parse all parquet files under `base_path`
    fn load(&self, base_path: &Path) -> Result<LoadOutcome<Self::Record>>;
}

/// Get a string column from a record batch
fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| RiskMapperError::ColumnError(format!("Column '{name}' not found")))?;
    batch
        .column(idx)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| RiskMapperError::ColumnError(format!("Column '{name}' is not a string array")))
}

/// Get an integer column from a record batch
fn int_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Int64Array> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| RiskMapperError::ColumnError(format!("Column '{name}' not found")))?;
    batch
        .column(idx)
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| {
            RiskMapperError::ColumnError(format!("Column '{name}' is not an Int64 array"))
        })
}

/// Extract a cleaned text value, `None` when null or empty after trimming
fn clean_text_value(array: &StringArray, row: usize) -> Option<String> {
    if array.is_null(row) {
        return None;
    }
    let cleaned = title_case(array.value(row));
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// Extract a trimmed pincode, empty string when null
fn pincode_value(array: &StringArray, row: usize) -> String {
    if array.is_null(row) {
        String::new()
    } else {
        array.value(row).trim().to_string()
    }
}

/// Parse a register date string; malformed values become `None`, never an error
fn parse_event_date(array: &StringArray, row: usize) -> Option<NaiveDate> {
    if array.is_null(row) {
        return None;
    }
    NaiveDate::parse_from_str(array.value(row).trim(), REGISTER_DATE_FORMAT).ok()
}

/// Trim and title-case a register text field
fn title_case(raw: &str) -> String {
    use itertools::Itertools;

    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::title_case;

    #[test]
    fn title_case_standardizes_register_text() {
        assert_eq!(title_case("  uttar pradesh "), "Uttar Pradesh");
        assert_eq!(title_case("DELHI"), "Delhi");
        assert_eq!(title_case(""), "");
    }
}
