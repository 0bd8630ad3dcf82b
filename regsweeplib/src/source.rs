//! Tabular source loading.
//!
//! Reads a spreadsheet workbook (`.xlsx`, `.xls`, `.xlsb`, `.ods`) or a
//! CSV file into a [`Table`]. The first row of the selected sheet is
//! taken as the header. Loading checks the path exists before opening
//! anything, so a bad path surfaces as [`RegsweepError::SourceNotFound`]
//! rather than a parse failure.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use log::debug;

use crate::error::RegsweepError;
use crate::table::{Cell, Table};
use crate::Result;

/// Which sheet of a workbook to read.
///
/// Ignored for CSV sources, which have a single section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelector {
    /// The first sheet in the workbook (default)
    #[default]
    First,
    /// A sheet by name
    Named(String),
    /// A sheet by zero-based position
    Index(usize),
}

impl SheetSelector {
    /// Selector from an optional sheet name.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(n) => SheetSelector::Named(n.to_string()),
            None => SheetSelector::First,
        }
    }
}

/// Load a tabular source file into a [`Table`].
///
/// Workbook formats are dispatched on the file extension; anything that
/// is not a recognized spreadsheet extension is read as CSV.
pub fn load_table(path: impl AsRef<Path>, sheet: &SheetSelector) -> Result<Table> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(RegsweepError::SourceNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("xlsx") | Some("xls") | Some("xlsb") | Some("ods") => {
            load_workbook(path, sheet)
        }
        _ => load_csv(path),
    }
}

/// Read one sheet of a spreadsheet workbook.
fn load_workbook(path: &Path, sheet: &SheetSelector) -> Result<Table> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| RegsweepError::SourceUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let sheet_names = workbook.sheet_names().to_vec();
    let name = match sheet {
        SheetSelector::First => sheet_names.first().cloned(),
        SheetSelector::Index(i) => sheet_names.get(*i).cloned(),
        SheetSelector::Named(n) => sheet_names.iter().find(|s| *s == n).cloned(),
    }
    .ok_or_else(|| RegsweepError::SheetNotFound {
        path: path.to_path_buf(),
        sheet: match sheet {
            SheetSelector::First => "<first>".to_string(),
            SheetSelector::Index(i) => format!("#{}", i),
            SheetSelector::Named(n) => n.clone(),
        },
    })?;

    debug!("reading sheet '{}' from {}", name, path.display());

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| RegsweepError::SourceUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut rows_iter = range.rows();
    let columns: Vec<String> = match rows_iter.next() {
        Some(header) => header.iter().map(header_name).collect(),
        None => Vec::new(),
    };

    let width = columns.len();
    let rows: Vec<Vec<Cell>> = rows_iter
        .map(|row| {
            // calamine ranges can be ragged at the right edge; pad or cut
            // to the header width so the table invariant holds.
            let mut cells: Vec<Cell> = row.iter().map(convert_cell).collect();
            cells.resize(width, Cell::Missing);
            cells
        })
        .collect();

    Table::new(columns, rows)
}

/// Read a CSV file. Empty fields become missing cells; everything else is
/// text (duplicate scanning compares key text, so no numeric inference is
/// attempted).
fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|e| RegsweepError::SourceUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| RegsweepError::SourceUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| RegsweepError::SourceUnreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cells: Vec<Cell> = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Missing
                } else {
                    Cell::text(field)
                }
            })
            .collect();
        rows.push(cells);
    }

    debug!(
        "read {} rows x {} columns from {}",
        rows.len(),
        columns.len(),
        path.display()
    );

    Table::new(columns, rows)
}

/// Header cells render through their display form. An empty header cell
/// yields an empty column name, which stays addressable by position.
fn header_name(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Map a calamine cell onto the closed cell variant.
fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Missing,
        Data::String(s) => Cell::text(s.clone()),
        Data::Float(f) => Cell::number(*f),
        Data::Int(i) => Cell::number(*i as f64),
        Data::Bool(b) => Cell::text(b.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => {
            Cell::text(data.to_string())
        }
        Data::Error(_) => Cell::Missing,
    }
}
