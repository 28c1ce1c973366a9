// src/error.rs

use thiserror::Error;

/// Errors produced by the extraction core.
///
/// Missing individual cells are not represented here: a missing value drops
/// its column from the affected row's series (with a `warn!`) and processing
/// continues. These variants cover the cases that abort a whole table.
#[derive(Debug, Error)]
pub enum ChartError {
    /// No names column in the table and no base name configured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The table does not match the metadata-rows-plus-data-rows convention.
    #[error("table shape error: {0}")]
    DataShape(String),

    /// Division by a zero or missing value in the comparison pipeline.
    #[error("arithmetic error at data row {row}: {detail}")]
    Arithmetic { row: usize, detail: String },
}
