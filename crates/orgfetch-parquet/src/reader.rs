use std::fs::File;
use std::path::Path;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use orgfetch_core::CompanyRecord;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::StoreError;

/// Reads every row of a company Parquet file back into records.
///
/// Columns are looked up by name, so files with extra columns or a different
/// column order still load. Non-UTF-8 string encodings are cast to `Utf8`.
///
/// # Errors
///
/// - [`StoreError::Io`] if the file cannot be opened.
/// - [`StoreError::Parquet`] if the file is not readable Parquet.
/// - [`StoreError::MissingColumn`] if a company column is absent.
/// - [`StoreError::Arrow`] if a batch cannot be decoded or cast.
pub fn read_company_records(path: &Path) -> Result<Vec<CompanyRecord>, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let parquet_err = |e| StoreError::Parquet {
        path: path.to_path_buf(),
        source: e,
    };
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .and_then(|builder| builder.build())
        .map_err(parquet_err)?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch.map_err(|e| StoreError::Arrow {
            context: path.display().to_string(),
            source: e,
        })?;
        records.extend(records_from_batch(&batch, path)?);
    }
    Ok(records)
}

fn records_from_batch(batch: &RecordBatch, path: &Path) -> Result<Vec<CompanyRecord>, StoreError> {
    let columns = CompanyRecord::COLUMNS
        .iter()
        .map(|&name| {
            let column = batch
                .column_by_name(name)
                .ok_or_else(|| StoreError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name,
                })?;
            cast(column, &DataType::Utf8).map_err(|e| StoreError::Arrow {
                context: format!("column {name} of {}", path.display()),
                source: e,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let strings: Vec<_> = columns.iter().map(|c| c.as_string::<i32>()).collect();

    let records = (0..batch.num_rows())
        .map(|row| {
            CompanyRecord::from_values(std::array::from_fn(|i| {
                let column = strings[i];
                column.is_valid(row).then(|| column.value(row).to_owned())
            }))
        })
        .collect();
    Ok(records)
}
