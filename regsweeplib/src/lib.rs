//! # regsweeplib
//!
//! Cleans member/address register spreadsheets and flags duplicate
//! records.
//!
//! ## Overview
//!
//! The library implements a two-stage batch pipeline with a CSV file as
//! the hand-off point:
//!
//! 1. **Export** ([`export_clean`]): read a tabular source (Excel
//!    workbook or CSV), normalize every text cell (line breaks to spaces,
//!    collapsed space runs, trimmed ends), drop rows and columns that are
//!    entirely empty, and write the result as a canonical UTF-8 CSV.
//! 2. **Scan** ([`scan_file`]): read the canonical CSV, group rows by
//!    exact equality of a key column (an email address, by convention),
//!    and write a timestamped plain-text report of every row that shares
//!    its key with another.
//!
//! Both stages load their whole input into memory, compute fully, and
//! write their whole output before returning. A scan that finds nothing
//! is a distinct success ([`ScanOutcome::Clean`]), not an error, and
//! writes no report file.
//!
//! ## Example
//!
//! ```rust
//! use regsweeplib::{export_clean, scan_file, ExportOptions, ScanOptions, ScanOutcome};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! let raw = dir.path().join("register.csv");
//! let cleaned = dir.path().join("cleaned.csv");
//! let report = dir.path().join("duplicate-rows.txt");
//! fs::write(&raw, "name,email\nAlice  A,x@a.com\nBob,x@a.com\n").unwrap();
//!
//! let summary = export_clean(&raw, &cleaned, &ExportOptions::new()).unwrap();
//! assert_eq!(summary.rows_out, 2);
//!
//! match scan_file(&cleaned, &report, &ScanOptions::new()).unwrap() {
//!     ScanOutcome::Duplicates { report, .. } => assert_eq!(report.row_count(), 2),
//!     ScanOutcome::Clean { .. } => unreachable!(),
//! }
//! ```

pub mod clean;
pub mod dupes;
pub mod error;
pub mod export;
pub mod report;
pub mod source;
pub mod table;

pub use clean::{clean_cell, clean_text, normalize, NormalizeOptions};
pub use dupes::{
    find_duplicates, scan_file, DuplicateReport, DuplicateRow, ScanOptions, ScanOutcome,
    DEFAULT_KEY_COLUMN,
};
pub use error::RegsweepError;
pub use export::{export_clean, write_csv, ExportOptions, ExportSummary};
pub use report::render_report;
pub use source::{load_table, SheetSelector};
pub use table::{Cell, Table};

/// Result type for regsweeplib operations
pub type Result<T> = std::result::Result<T, RegsweepError>;
