//! Cell cleaning and table normalization.
//!
//! Cleaning is a pure, per-cell operation: line breaks become spaces,
//! space runs collapse, and surrounding whitespace is stripped. It is
//! idempotent and has no dependency on row or column context. Filtering
//! then removes rows that are entirely empty, and afterwards columns that
//! are entirely empty across the surviving rows. The order is fixed: a
//! row kept alive by a cell in a column that is later dropped stays, and
//! column emptiness is judged only against rows that survived.

use crate::table::{Cell, Table};

/// Clean a single text value: line breaks to spaces, space runs collapsed,
/// leading/trailing whitespace stripped.
///
/// Idempotent: `clean_text(clean_text(x)) == clean_text(x)`.
pub fn clean_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_space = false;

    for ch in value.chars() {
        let ch = match ch {
            '\n' | '\r' => ' ',
            other => other,
        };
        if ch == ' ' {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(ch);
            prev_space = false;
        }
    }

    out.trim().to_string()
}

/// Clean a single cell.
///
/// Only text cells are touched; numbers and missing cells pass through.
/// A text cell that cleans down to nothing becomes [`Cell::Missing`],
/// since a blank-after-trim cell carries no value.
pub fn clean_cell(cell: Cell) -> Cell {
    match cell {
        Cell::Text(s) => {
            let cleaned = clean_text(&s);
            if cleaned.is_empty() {
                Cell::Missing
            } else {
                Cell::Text(cleaned)
            }
        }
        other => other,
    }
}

/// Options for table normalization.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Drop rows whose cells are all missing
    pub drop_empty_rows: bool,
    /// Drop columns whose cells are all missing (judged after row filtering)
    pub drop_empty_columns: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            drop_empty_rows: true,
            drop_empty_columns: true,
        }
    }
}

impl NormalizeOptions {
    /// Create default options: drop empty rows and empty columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether all-missing rows are dropped.
    pub fn drop_empty_rows(mut self, drop: bool) -> Self {
        self.drop_empty_rows = drop;
        self
    }

    /// Set whether all-missing columns are dropped.
    pub fn drop_empty_columns(mut self, drop: bool) -> Self {
        self.drop_empty_columns = drop;
        self
    }
}

/// Normalize a table: clean every cell, then filter degenerate rows and
/// columns according to `options`.
///
/// Surviving rows keep their relative order; surviving columns keep
/// theirs. Row filtering happens before column filtering.
pub fn normalize(table: Table, options: &NormalizeOptions) -> Table {
    let Table { columns, rows } = table;

    let mut rows: Vec<Vec<Cell>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(clean_cell).collect())
        .collect();

    if options.drop_empty_rows {
        rows.retain(|row| !row.iter().all(Cell::is_missing));
    }

    if !options.drop_empty_columns {
        return Table { columns, rows };
    }

    // Column emptiness is evaluated against the rows that survived above.
    let keep: Vec<bool> = (0..columns.len())
        .map(|col| rows.iter().any(|row| !row[col].is_missing()))
        .collect();

    let columns = columns
        .into_iter()
        .zip(&keep)
        .filter_map(|(name, &k)| k.then_some(name))
        .collect();

    let rows = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&keep)
                .filter_map(|(cell, &k)| k.then_some(cell))
                .collect()
        })
        .collect();

    Table { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("a\n\n  b   c\r"), "a b c");
    }

    #[test]
    fn test_clean_text_trims() {
        assert_eq!(clean_text("  hello  "), "hello");
        assert_eq!(clean_text("\thello\t"), "hello");
        assert_eq!(clean_text("\r\n"), "");
    }

    #[test]
    fn test_clean_text_idempotent() {
        for input in ["a\n\n  b   c\r", "  x  ", "already clean", "", "\n \r "] {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_clean_text_preserves_non_space_whitespace() {
        // Only LF, CR, and space runs are touched; interior tabs stay.
        assert_eq!(clean_text("a\tb"), "a\tb");
    }

    #[test]
    fn test_clean_cell_blank_becomes_missing() {
        assert_eq!(clean_cell(Cell::text("   \n ")), Cell::Missing);
        assert_eq!(clean_cell(Cell::text(" x ")), Cell::text("x"));
        assert_eq!(clean_cell(Cell::number(3.0)), Cell::number(3.0));
        assert_eq!(clean_cell(Cell::Missing), Cell::Missing);
    }

    fn raw_table() -> Table {
        Table::new(
            vec!["name".into(), "email".into(), "spare".into()],
            vec![
                vec![
                    Cell::text("  Alice \n Andersson "),
                    Cell::text("x@a.com"),
                    Cell::Missing,
                ],
                vec![Cell::text("   "), Cell::Missing, Cell::Missing],
                vec![Cell::text("Bob"), Cell::Missing, Cell::Missing],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_drops_empty_rows_and_columns() {
        let result = normalize(raw_table(), &NormalizeOptions::new());

        assert_eq!(result.columns, vec!["name", "email"]);
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.rows[0][0], Cell::text("Alice Andersson"));
        assert_eq!(result.rows[1][0], Cell::text("Bob"));
    }

    #[test]
    fn test_normalize_leaves_no_degenerate_rows_or_columns() {
        let result = normalize(raw_table(), &NormalizeOptions::new());

        for row in 0..result.row_count() {
            assert!(!result.is_row_empty(row));
        }
        for col in 0..result.column_count() {
            assert!(!result.is_column_empty(col));
        }
    }

    #[test]
    fn test_normalize_monotone_counts() {
        let input = raw_table();
        let (rows_in, cols_in) = (input.row_count(), input.column_count());
        let result = normalize(input, &NormalizeOptions::new());

        assert!(result.row_count() <= rows_in);
        assert!(result.column_count() <= cols_in);
    }

    #[test]
    fn test_normalize_keep_empty_columns_flag() {
        let options = NormalizeOptions::new().drop_empty_columns(false);
        let result = normalize(raw_table(), &options);

        assert_eq!(result.columns, vec!["name", "email", "spare"]);
        // Empty rows are still dropped.
        assert_eq!(result.row_count(), 2);
    }

    #[test]
    fn test_normalize_keep_empty_rows_flag() {
        let options = NormalizeOptions::new().drop_empty_rows(false);
        let result = normalize(raw_table(), &options);

        assert_eq!(result.row_count(), 3);
        assert!(result.is_row_empty(1));
    }

    #[test]
    fn test_row_kept_for_cell_in_surviving_column_only() {
        // The second row is non-empty only in a column that survives, so
        // it stays; the "spare" column is judged after row filtering.
        let table = Table::new(
            vec!["a".into(), "spare".into()],
            vec![
                vec![Cell::text("x"), Cell::Missing],
                vec![Cell::text("y"), Cell::Missing],
            ],
        )
        .unwrap();

        let result = normalize(table, &NormalizeOptions::new());
        assert_eq!(result.columns, vec!["a"]);
        assert_eq!(result.row_count(), 2);
    }

    #[test]
    fn test_column_kept_alive_only_by_deleted_row_is_dropped() {
        // The "ghost" column's only content lives in a row that cleans to
        // all-missing. Row filtering removes that row first, so the column
        // is judged empty and dropped too.
        let table = Table::new(
            vec!["a".into(), "ghost".into()],
            vec![
                vec![Cell::text("x"), Cell::Missing],
                vec![Cell::text("  "), Cell::text(" \n ")],
            ],
        )
        .unwrap();

        let result = normalize(table, &NormalizeOptions::new());
        assert_eq!(result.columns, vec!["a"]);
        assert_eq!(result.row_count(), 1);
    }
}
