//! Arrow schemas for the register extracts
//!
//! Dates arrive as `%d-%m-%Y` strings and are parsed during
//! deserialization, so every date column is Utf8 here.

use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

/// Schema for the enrolment register
#[must_use]
pub fn enrolment_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("state", DataType::Utf8, true),
        Field::new("district", DataType::Utf8, true),
        Field::new("pincode", DataType::Utf8, true),
        Field::new("date", DataType::Utf8, true),
        Field::new("age_0_5", DataType::Int64, true),
        Field::new("age_5_17", DataType::Int64, true),
        Field::new("age_18_plus", DataType::Int64, true),
    ]))
}

/// Schema shared by the demographic- and biometric-update registers
#[must_use]
pub fn update_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("state", DataType::Utf8, true),
        Field::new("district", DataType::Utf8, true),
        Field::new("pincode", DataType::Utf8, true),
        Field::new("date", DataType::Utf8, true),
    ]))
}
