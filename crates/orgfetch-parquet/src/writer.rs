use std::path::Path;

use orgfetch_core::CompanyRecord;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tempfile::NamedTempFile;

use crate::schema::record_batch;
use crate::StoreError;

/// Writes `record` as a single-row Parquet file at `destination`.
///
/// The row is encoded into a temporary file next to `destination`, which is
/// then renamed over it. A failed write leaves any existing file untouched
/// and removes the temporary file. Concurrent writers to the same path race
/// and the last rename wins.
///
/// # Errors
///
/// - [`StoreError::Io`] if the temporary file cannot be created or renamed.
/// - [`StoreError::Arrow`] if the row cannot be assembled.
/// - [`StoreError::Parquet`] if encoding or flushing fails.
pub fn write_company_record(record: &CompanyRecord, destination: &Path) -> Result<(), StoreError> {
    let batch = record_batch(std::slice::from_ref(record))?;

    let io_err = |e| StoreError::Io {
        path: destination.to_path_buf(),
        source: e,
    };
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(io_err)?;
    let parquet_err = |e| StoreError::Parquet {
        path: destination.to_path_buf(),
        source: e,
    };

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(staged.as_file_mut(), batch.schema(), Some(props))
        .map_err(parquet_err)?;
    writer.write(&batch).map_err(parquet_err)?;
    writer.close().map_err(parquet_err)?;

    staged.persist(destination).map_err(|e| io_err(e.error))?;

    tracing::info!(
        path = %destination.display(),
        permalink = record.permalink.as_deref().unwrap_or("-"),
        "company record saved"
    );
    Ok(())
}
