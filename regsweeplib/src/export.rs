//! The cleaning stage: source workbook in, canonical CSV out.
//!
//! `export_clean` is the first half of the pipeline. It loads a tabular
//! source, normalizes it, and serializes the result as a UTF-8
//! comma-delimited file with a header row and no index column. The output
//! file is only created after normalization has finished, so a failed run
//! never leaves a partial file behind.

use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;

use crate::clean::{normalize, NormalizeOptions};
use crate::source::{load_table, SheetSelector};
use crate::table::Table;
use crate::Result;

/// Options for the clean-and-export operation.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Which sheet of the source workbook to read
    pub sheet: SheetSelector,
    /// Normalization behavior
    pub normalize: NormalizeOptions,
}

impl ExportOptions {
    /// Create default options: first sheet, drop empty rows and columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the sheet to read.
    pub fn sheet(mut self, sheet: SheetSelector) -> Self {
        self.sheet = sheet;
        self
    }

    /// Set normalization options.
    pub fn normalize(mut self, options: NormalizeOptions) -> Self {
        self.normalize = options;
        self
    }
}

/// Summary of a completed export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Rows in the source table (excluding header)
    pub rows_in: usize,
    /// Columns in the source table
    pub columns_in: usize,
    /// Rows written to the canonical CSV
    pub rows_out: usize,
    /// Columns written to the canonical CSV
    pub columns_out: usize,
    /// Where the canonical CSV was written
    pub output: PathBuf,
}

/// Clean a tabular source and write it as a canonical CSV.
pub fn export_clean(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ExportOptions,
) -> Result<ExportSummary> {
    let input = input.as_ref();
    let output = output.as_ref();

    let table = load_table(input, &options.sheet)?;
    let (rows_in, columns_in) = (table.row_count(), table.column_count());

    let cleaned = normalize(table, &options.normalize);

    write_csv(&cleaned, output)?;
    info!(
        "exported {} -> {} ({} rows, {} columns)",
        input.display(),
        output.display(),
        cleaned.row_count(),
        cleaned.column_count()
    );

    Ok(ExportSummary {
        rows_in,
        columns_in,
        rows_out: cleaned.row_count(),
        columns_out: cleaned.column_count(),
        output: output.to_path_buf(),
    })
}

/// Serialize a table as a UTF-8 comma-delimited file: one header line, one
/// line per row, no row-index artifact.
pub fn write_csv(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush()?;

    Ok(())
}
