//! Enrolment register loader
//!
//! The enrolment register carries one row per enrolment transaction with
//! the three mutually exclusive age-bracket counts.

use std::path::Path;

use arrow::array::Array;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use super::schemas::enrolment_schema;
use super::{LoadOutcome, RegisterReader, clean_text_value, int_column, parse_event_date,
            pincode_value, string_column};
use crate::error::Result;
use crate::models::EnrolmentRecord;
use crate::utils::{load_parquet_files_parallel, log_warning};

/// Loader for the enrolment register
#[derive(Debug, Clone)]
pub struct EnrolmentRegister {
    schema: SchemaRef,
}

impl EnrolmentRegister {
    /// Create a new enrolment register loader
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema: enrolment_schema(),
        }
    }

    /// Deserialize one record batch into enrolment records
    ///
    /// Returns the parsed records and the number of rows dropped for
    /// missing critical fields (state, district, date) or null age counts.
    pub fn deserialize_batch(&self, batch: &RecordBatch) -> Result<(Vec<EnrolmentRecord>, usize)> {
        let state = string_column(batch, "state")?;
        let district = string_column(batch, "district")?;
        let pincode = string_column(batch, "pincode")?;
        let date = string_column(batch, "date")?;
        let age_0_5 = int_column(batch, "age_0_5")?;
        let age_5_17 = int_column(batch, "age_5_17")?;
        let age_18_plus = int_column(batch, "age_18_plus")?;

        let mut records = Vec::with_capacity(batch.num_rows());
        let mut dropped = 0;

        for row in 0..batch.num_rows() {
            let parsed_date = parse_event_date(date, row);
            let (Some(state), Some(district), Some(event_date)) = (
                clean_text_value(state, row),
                clean_text_value(district, row),
                parsed_date,
            ) else {
                dropped += 1;
                continue;
            };
            if age_0_5.is_null(row) || age_5_17.is_null(row) || age_18_plus.is_null(row) {
                dropped += 1;
                continue;
            }

            records.push(EnrolmentRecord {
                state,
                district,
                pincode: pincode_value(pincode, row),
                date: Some(event_date),
                age_0_5: age_0_5.value(row).max(0) as u64,
                age_5_17: age_5_17.value(row).max(0) as u64,
                age_18_plus: age_18_plus.value(row).max(0) as u64,
            });
        }

        Ok((records, dropped))
    }
}

impl Default for EnrolmentRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterReader for EnrolmentRegister {
    type Record = EnrolmentRecord;

    fn register_name(&self) -> &'static str {
        "enrolment"
    }

    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn load(&self, base_path: &Path) -> Result<LoadOutcome<EnrolmentRecord>> {
        let batches = load_parquet_files_parallel(base_path, Some(self.schema.as_ref()))?;

        let mut records = Vec::new();
        let mut dropped_rows = 0;
        for batch in &batches {
            let (batch_records, batch_dropped) = self.deserialize_batch(batch)?;
            records.extend(batch_records);
            dropped_rows += batch_dropped;
        }

        if dropped_rows > 0 {
            log_warning(
                &format!(
                    "Dropped {dropped_rows} enrolment rows with missing critical fields"
                ),
                Some(base_path),
            );
        }
        log::info!("Loaded {} enrolment records", records.len());

        Ok(LoadOutcome {
            records,
            dropped_rows,
        })
    }
}
