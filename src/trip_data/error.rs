use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Trip data file '{0}' does not exist")]
    FileNotFound(PathBuf),

    #[error("Trip data path '{0}' is not a regular file")]
    NotAFile(PathBuf),

    #[error("Failed to read metadata for trip data file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse '{path}' as CSV")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Column '{column}' in '{path}' could not be read as {expected}")]
    ColumnType {
        path: PathBuf,
        column: String,
        expected: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("Missing value for required column '{column}' at row {row} of '{path}'")]
    MissingValue {
        path: PathBuf,
        column: String,
        row: usize,
    },

    #[error("Unparseable timestamp '{value}' in column '{column}' at row {row} of '{path}'")]
    InvalidTimestamp {
        path: PathBuf,
        column: String,
        row: usize,
        value: String,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
