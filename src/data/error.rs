//! Error types for the data layer.

use thiserror::Error;

pub type DataResult<T> = Result<T, DataError>;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV file has no columns")]
    NoColumns,
    #[error("column not found: {0:?}")]
    ColumnNotFound(String),
    #[error("column {0:?} is not numeric")]
    NotNumeric(String),
}
