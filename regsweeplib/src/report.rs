//! Plain-text rendering of a duplicate report.
//!
//! The report is a standalone text document: a timestamped header line, a
//! blank line, then the full duplicate rows as a width-aligned table over
//! all columns of the scanned table. Cells are right-aligned within their
//! column width, with a two-space gutter between columns.

use crate::dupes::DuplicateReport;

/// Gutter between columns in the rendered table.
const GUTTER: &str = "  ";

/// Render a duplicate report as a text document.
///
/// Rows appear in the report's own order (ascending key, stable ties).
/// The result ends with a newline.
pub fn render_report(report: &DuplicateReport) -> String {
    let timestamp = report.generated_at.format("%Y-%m-%d %H:%M:%S");
    let mut out = format!(
        "Duplicate '{}' values found on {}:\n\n",
        report.key_column, timestamp
    );

    // Column width: widest of the header and every cell in that column.
    let widths: Vec<usize> = report
        .columns
        .iter()
        .enumerate()
        .map(|(col, name)| {
            report
                .rows
                .iter()
                .map(|row| row.cells[col].to_string().chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = report
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{:>width$}", name, width = width))
        .collect();
    out.push_str(&header.join(GUTTER));
    out.push('\n');

    for row in &report.rows {
        let line: Vec<String> = row
            .cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = width))
            .collect();
        out.push_str(&line.join(GUTTER));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dupes::DuplicateRow;
    use crate::table::Cell;
    use chrono::{Local, TimeZone};

    fn sample_report() -> DuplicateReport {
        DuplicateReport {
            key_column: "email".to_string(),
            columns: vec!["name".into(), "email".into()],
            rows: vec![
                DuplicateRow {
                    index: 0,
                    cells: vec![Cell::text("Alice"), Cell::text("x@a.com")],
                },
                DuplicateRow {
                    index: 2,
                    cells: vec![Cell::text("Al"), Cell::text("x@a.com")],
                },
            ],
            generated_at: Local.with_ymd_and_hms(2024, 9, 21, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_header_line_carries_timestamp() {
        let text = render_report(&sample_report());
        assert!(text.starts_with("Duplicate 'email' values found on 2024-09-21 10:30:00:\n\n"));
    }

    #[test]
    fn test_columns_align() {
        let text = render_report(&sample_report());
        let lines: Vec<&str> = text.lines().collect();

        // Header line, blank line, column line, two data rows.
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], " name    email");
        assert_eq!(lines[3], "Alice  x@a.com");
        assert_eq!(lines[4], "   Al  x@a.com");
    }

    #[test]
    fn test_missing_cells_render_blank() {
        let mut report = sample_report();
        report.rows[1].cells[0] = Cell::Missing;

        let text = render_report(&report);
        assert!(text.lines().last().unwrap().starts_with("     "));
    }

    #[test]
    fn test_ends_with_newline() {
        assert!(render_report(&sample_report()).ends_with('\n'));
    }
}
