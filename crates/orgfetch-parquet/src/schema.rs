use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use orgfetch_core::CompanyRecord;

use crate::StoreError;

/// Seven nullable UTF-8 columns in [`CompanyRecord::COLUMNS`] order.
///
/// `updated_at` stays a string; the API's timestamp is stored verbatim.
#[must_use]
pub fn company_schema() -> SchemaRef {
    let fields: Vec<Field> = CompanyRecord::COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8, true))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Builds one Arrow batch with a row per record.
///
/// # Errors
///
/// Returns [`StoreError::Arrow`] if the columns do not fit the schema.
pub fn record_batch(records: &[CompanyRecord]) -> Result<RecordBatch, StoreError> {
    let rows: Vec<[Option<&str>; 7]> = records.iter().map(CompanyRecord::values).collect();
    let columns: Vec<ArrayRef> = (0..CompanyRecord::COLUMNS.len())
        .map(|i| Arc::new(rows.iter().map(|row| row[i]).collect::<StringArray>()) as ArrayRef)
        .collect();

    RecordBatch::try_new(company_schema(), columns).map_err(|e| StoreError::Arrow {
        context: "company record batch".to_owned(),
        source: e,
    })
}
