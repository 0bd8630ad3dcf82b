//! Error types for regsweeplib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while cleaning a register or scanning for duplicates
#[derive(Error, Debug)]
pub enum RegsweepError {
    /// Input path does not resolve to a file
    #[error("source not found: {0}")]
    SourceNotFound(PathBuf),

    /// Input exists but cannot be parsed as tabular data
    #[error("source '{path}' is not readable as tabular data: {message}")]
    SourceUnreadable { path: PathBuf, message: String },

    /// Requested worksheet is absent from the workbook
    #[error("sheet '{sheet}' not found in '{path}'")]
    SheetNotFound { path: PathBuf, sheet: String },

    /// A data row has a different cell count than the header
    #[error("row {row} has {found} cells, expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The configured key column is absent from the table
    #[error("key column '{column}' not found (available: {available})")]
    KeyColumnMissing { column: String, available: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
