//! Write/read tests for the company Parquet file against a temp directory.

use std::fs::File;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use orgfetch_core::CompanyRecord;
use orgfetch_parquet::{read_company_records, write_company_record, StoreError};
use parquet::arrow::ArrowWriter;

fn sample_record() -> CompanyRecord {
    CompanyRecord {
        permalink: Some("test-permalink".to_owned()),
        website_url: Some("https://test.com".to_owned()),
        updated_at: Some("2024-02-01T05:45:15Z".to_owned()),
        linkedin: Some("https://linkedin.com/test".to_owned()),
        city: Some("Test City".to_owned()),
        region: Some("Test Region".to_owned()),
        country: Some("Test Country".to_owned()),
    }
}

#[test]
fn written_record_reads_back_equal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.parquet");

    write_company_record(&sample_record(), &path).expect("write should succeed");
    let records = read_company_records(&path).expect("read should succeed");

    assert_eq!(records, vec![sample_record()]);
}

#[test]
fn all_null_record_reads_back_equal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.parquet");

    write_company_record(&CompanyRecord::default(), &path).unwrap();
    let records = read_company_records(&path).unwrap();

    assert_eq!(records, vec![CompanyRecord::default()]);
}

#[test]
fn partially_null_record_reads_back_equal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.parquet");
    let record = CompanyRecord {
        linkedin: None,
        region: None,
        ..sample_record()
    };

    write_company_record(&record, &path).unwrap();

    assert_eq!(read_company_records(&path).unwrap(), vec![record]);
}

#[test]
fn writing_twice_produces_identical_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("company.parquet");

    write_company_record(&sample_record(), &path).unwrap();
    let first = std::fs::read(&path).unwrap();
    write_company_record(&sample_record(), &path).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(read_company_records(&path).unwrap().len(), 1);
}

#[test]
fn existing_file_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("company.parquet");
    std::fs::write(&path, b"stale contents that are not parquet").unwrap();

    write_company_record(&sample_record(), &path).unwrap();

    assert_eq!(read_company_records(&path).unwrap(), vec![sample_record()]);
}

#[test]
fn successful_write_leaves_no_staging_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("company.parquet");

    write_company_record(&sample_record(), &path).unwrap();
    write_company_record(&sample_record(), &path).unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("company.parquet")]);
}

#[test]
fn failed_replace_keeps_destination_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    // A non-empty directory at the destination cannot be replaced by a file.
    let path = dir.path().join("company.parquet");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep.txt"), b"previous run").unwrap();

    let err = write_company_record(&sample_record(), &path).unwrap_err();

    assert!(
        matches!(err, StoreError::Io { path: ref p, .. } if *p == path),
        "expected Io error, got: {err:?}"
    );
    assert_eq!(std::fs::read(path.join("keep.txt")).unwrap(), b"previous run");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn missing_parent_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("company.parquet");

    let err = write_company_record(&sample_record(), &path).unwrap_err();

    assert!(
        matches!(err, StoreError::Io { path: ref p, .. } if *p == path),
        "expected Io error, got: {err:?}"
    );
}

#[test]
fn reading_non_parquet_file_is_parquet_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.parquet");
    std::fs::write(&path, b"definitely not parquet").unwrap();

    let err = read_company_records(&path).unwrap_err();

    assert!(matches!(err, StoreError::Parquet { .. }), "got: {err:?}");
}

#[test]
fn reading_file_without_company_columns_is_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.parquet");
    let schema = Arc::new(Schema::new(vec![Field::new(
        "permalink",
        DataType::Utf8,
        true,
    )]));
    let column: ArrayRef = Arc::new(StringArray::from(vec![Some("konsus")]));
    let batch = RecordBatch::try_new(Arc::clone(&schema), vec![column]).unwrap();
    let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let err = read_company_records(&path).unwrap_err();

    assert!(
        matches!(err, StoreError::MissingColumn { column: "website_url", .. }),
        "got: {err:?}"
    );
}
