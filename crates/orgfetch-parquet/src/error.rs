use std::path::PathBuf;

use thiserror::Error;

/// Errors from writing or reading the company Parquet file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Building or decoding the Arrow batch failed.
    #[error("Arrow error for {context}: {source}")]
    Arrow {
        context: String,
        #[source]
        source: arrow::error::ArrowError,
    },

    #[error("Parquet error on {}: {source}", path.display())]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("{} has no column named {column}", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
}
