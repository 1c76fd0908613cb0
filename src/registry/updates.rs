//! Demographic- and biometric-update register loaders
//!
//! Both update registers share a schema; only the register name (and the
//! directory the caller points at) differs.

use std::path::Path;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use super::schemas::update_schema;
use super::{LoadOutcome, RegisterReader, clean_text_value, parse_event_date, pincode_value,
            string_column};
use crate::error::Result;
use crate::models::UpdateRecord;
use crate::utils::{load_parquet_files_parallel, log_warning};

/// Loader for an update register (demographic or biometric)
#[derive(Debug, Clone)]
pub struct UpdateRegister {
    name: &'static str,
    schema: SchemaRef,
}

impl UpdateRegister {
    /// Loader for the demographic-update register
    #[must_use]
    pub fn demographic() -> Self {
        Self {
            name: "demographic",
            schema: update_schema(),
        }
    }

    /// Loader for the biometric-update register
    #[must_use]
    pub fn biometric() -> Self {
        Self {
            name: "biometric",
            schema: update_schema(),
        }
    }

    /// Deserialize one record batch into update records
    ///
    /// Returns the parsed records and the number of rows dropped for
    /// missing critical fields (state, district, date).
    pub fn deserialize_batch(&self, batch: &RecordBatch) -> Result<(Vec<UpdateRecord>, usize)> {
        let state = string_column(batch, "state")?;
        let district = string_column(batch, "district")?;
        let pincode = string_column(batch, "pincode")?;
        let date = string_column(batch, "date")?;

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

            records.push(UpdateRecord {
                state,
                district,
                pincode: pincode_value(pincode, row),
                date: Some(event_date),
            });
        }

        Ok((records, dropped))
    }
}

impl RegisterReader for UpdateRegister {
    type Record = UpdateRecord;

    fn register_name(&self) -> &'static str {
        self.name
    }

    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn load(&self, base_path: &Path) -> Result<LoadOutcome<UpdateRecord>> {
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
                    "Dropped {dropped_rows} {} update rows with missing critical fields",
                    self.name
                ),
                Some(base_path),
            );
        }
        log::info!("Loaded {} {} update records", records.len(), self.name);

        Ok(LoadOutcome {
            records,
            dropped_rows,
        })
    }
}
