//! Data module - table model, CSV loading and filtering

mod error;
mod handler;
mod table;

pub use error::{DataError, DataResult};
pub use handler::DataHandler;
pub use table::{Column, ColumnData, Table};
