//! The scanning stage: find rows sharing a key value.
//!
//! `find_duplicates` groups the rows of a canonical table by exact
//! equality of a key column (an email address, conventionally) and keeps
//! every group of two or more. Rows whose key is missing or empty never
//! participate: an unset key is not evidence of duplication. The result
//! is ordered by ascending key text, with ties keeping their original
//! row order.
//!
//! Finding nothing is a success, not an error: `scan_file` returns
//! [`ScanOutcome::Clean`] and writes no report file in that case.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;
use serde::Serialize;

use crate::error::RegsweepError;
use crate::report::render_report;
use crate::source::{load_table, SheetSelector};
use crate::table::{Cell, Table};
use crate::Result;

/// Column name scanned for duplicates when none is configured.
pub const DEFAULT_KEY_COLUMN: &str = "email";

/// Options for the duplicate scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Name of the column whose value keys duplicate groups
    pub key_column: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            key_column: DEFAULT_KEY_COLUMN.to_string(),
        }
    }
}

impl ScanOptions {
    /// Create default options (key column `"email"`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key column name.
    pub fn key_column(mut self, name: impl Into<String>) -> Self {
        self.key_column = name.into();
        self
    }
}

/// A single row that belongs to a duplicate group.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateRow {
    /// Zero-based position in the scanned table
    pub index: usize,
    /// The full set of column values for this row
    pub cells: Vec<Cell>,
}

/// All duplicate rows found in one scan, sorted by key.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateReport {
    /// The key column the scan grouped on
    pub key_column: String,
    /// Column names of the scanned table
    pub columns: Vec<String>,
    /// Qualifying rows, ascending by key text, ties in original order
    pub rows: Vec<DuplicateRow>,
    /// When the scan ran
    pub generated_at: DateTime<Local>,
}

impl DuplicateReport {
    /// True when no duplicate group was found.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of duplicate rows (across all groups).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Outcome of scanning a file for duplicates.
#[derive(Debug)]
pub enum ScanOutcome {
    /// Every non-empty key was unique; no report file was written
    Clean {
        /// Rows that participated in the scan
        rows_scanned: usize,
    },
    /// Duplicates were found and the rendered report written to `path`
    Duplicates {
        report: DuplicateReport,
        path: PathBuf,
    },
}

/// Scan a table for rows sharing a key value.
///
/// The key column must exist; otherwise this fails with
/// [`RegsweepError::KeyColumnMissing`] before any grouping work.
pub fn find_duplicates(table: &Table, key_column: &str) -> Result<DuplicateReport> {
    let key_idx = table.column_index(key_column).ok_or_else(|| {
        RegsweepError::KeyColumnMissing {
            column: key_column.to_string(),
            available: table.columns.join(", "),
        }
    })?;

    // First pass: key text per row, counting occurrences. Missing and
    // empty keys are excluded up front.
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut keyed: Vec<(usize, String)> = Vec::new();
    for (index, row) in table.rows.iter().enumerate() {
        let key = match &row[key_idx] {
            Cell::Missing => continue,
            cell => cell.to_string(),
        };
        if key.is_empty() {
            continue;
        }
        *counts.entry(key.clone()).or_insert(0) += 1;
        keyed.push((index, key));
    }

    // Second pass: keep rows whose key occurs at least twice, then order
    // by key. `sort_by` is stable, so tied rows keep table order.
    let mut hits: Vec<(usize, String)> = keyed
        .into_iter()
        .filter(|(_, key)| counts[key] >= 2)
        .collect();
    hits.sort_by(|a, b| a.1.cmp(&b.1));

    let rows = hits
        .into_iter()
        .map(|(index, _)| DuplicateRow {
            index,
            cells: table.rows[index].clone(),
        })
        .collect();

    Ok(DuplicateReport {
        key_column: key_column.to_string(),
        columns: table.columns.clone(),
        rows,
        generated_at: Local::now(),
    })
}

/// Scan a canonical CSV file and, if duplicates exist, write the rendered
/// report to `report_path`.
///
/// Preconditions (file exists, key column present) are checked before any
/// output; a clean table or a failed scan writes no report file.
pub fn scan_file(
    input: impl AsRef<Path>,
    report_path: impl AsRef<Path>,
    options: &ScanOptions,
) -> Result<ScanOutcome> {
    let input = input.as_ref();
    let report_path = report_path.as_ref();

    let table = load_table(input, &SheetSelector::First)?;
    let report = find_duplicates(&table, &options.key_column)?;

    if report.is_empty() {
        info!("no duplicate '{}' values in {}", options.key_column, input.display());
        return Ok(ScanOutcome::Clean {
            rows_scanned: table.row_count(),
        });
    }

    fs::write(report_path, render_report(&report))?;
    info!(
        "{} duplicate rows written to {}",
        report.row_count(),
        report_path.display()
    );

    Ok(ScanOutcome::Duplicates {
        report,
        path: report_path.to_path_buf(),
    })
}
