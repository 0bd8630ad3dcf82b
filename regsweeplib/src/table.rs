//! In-memory tabular data model.
//!
//! A [`Table`] is an ordered set of named columns over row-major cells,
//! with every row holding exactly one cell per column. A [`Cell`] is a
//! closed tagged variant: free text, a number, or nothing at all. Only
//! text cells participate in normalization; the other two pass through
//! the pipeline untouched.

use serde::{Deserialize, Serialize};

use crate::error::RegsweepError;
use crate::Result;

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Free-text content
    Text(String),
    /// Numeric content
    Number(f64),
    /// No meaningful value (absent, null, or blank after trimming)
    Missing,
}

impl Cell {
    /// Create a text cell
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Create a numeric cell
    pub fn number(value: f64) -> Self {
        Cell::Number(value)
    }

    /// Check whether this cell carries no value
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Borrow the text content, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    /// Render the cell the way it is written to CSV: missing cells render
    /// empty, whole numbers render without a fractional part.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Cell::Missing => String::new(),
        };

        // Respect width and alignment from the formatter
        if let Some(width) = f.width() {
            if f.align() == Some(std::fmt::Alignment::Left) {
                write!(f, "{:<width$}", s, width = width)
            } else {
                write!(f, "{:>width$}", s, width = width)
            }
        } else {
            write!(f, "{}", s)
        }
    }
}

/// An in-memory table: named columns over row-major cells.
///
/// Invariant: every row has exactly `columns.len()` cells. Ragged input
/// is rejected at construction with [`RegsweepError::ShapeMismatch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Ordered column names (the header row)
    pub columns: Vec<String>,
    /// Row-major cell data, aligned with `columns`
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table from a header and data rows, enforcing rectangular shape.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let expected = columns.len();
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(RegsweepError::ShapeMismatch {
                    row: idx,
                    expected,
                    found: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Number of data rows (the header is not a row)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column by name, if present
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// A row is empty when every cell in it is missing
    pub fn is_row_empty(&self, row: usize) -> bool {
        self.rows[row].iter().all(Cell::is_missing)
    }

    /// A column is empty when every cell in it is missing, independent of
    /// row emptiness
    pub fn is_column_empty(&self, col: usize) -> bool {
        self.rows.iter().all(|row| row[col].is_missing())
    }
}
