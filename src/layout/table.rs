//! Pipe table formatting.
//!
//! A run of lines containing `|` becomes fixed-width text rows:
//!
//! ```text
//! | Item | Qty |        Item    |Qty          (bold)
//! |------|-----|   ──►  ---------------
//! | Tea  | 2   |        Tea     |2
//!                       (blank)
//! ```
//!
//! Columns are sized to their longest cell plus two, capped at
//! [`MAX_COLUMN_WIDTH`] characters. Cells longer than their column are cut.

use tracing::debug;

use super::{StyleTag, StyledLine};

/// Hard cap on a column's width in characters.
pub const MAX_COLUMN_WIDTH: usize = 15;

/// Spaces added after the longest cell of a column.
const CELL_PADDING: usize = 2;

/// Format the table block starting at `lines[start]`.
///
/// Returns the formatted lines and the index of the first line after the
/// block. Blank lines between rows are skipped. With fewer than two rows
/// the block is not a table: the start line comes back as a Plain line and
/// only that line is consumed.
pub fn format_table(lines: &[&str], start: usize) -> (Vec<StyledLine>, usize) {
    let (rows, next) = collect_rows(lines, start);

    if rows.len() < 2 {
        debug!(line = start, "table block has fewer than two rows, keeping as text");
        let text = lines.get(start).map(|l| l.trim_end()).unwrap_or_default();
        return (vec![StyledLine::plain(text)], start + 1);
    }

    let header = split_cells(rows[0]);
    let body_rows = if is_separator(rows[1]) {
        &rows[2..]
    } else {
        &rows[1..]
    };
    let body: Vec<Vec<String>> = body_rows.iter().map(|row| split_cells(row)).collect();

    let widths = column_widths(&header, &body);
    let header_line = format_row(&header, &widths);
    let separator = "-".repeat(header_line.chars().count());

    let mut out = Vec::with_capacity(body.len() + 3);
    out.push(StyledLine::new(header_line, StyleTag::Bold));
    out.push(StyledLine::plain(separator));
    out.extend(body.iter().map(|row| StyledLine::plain(format_row(row, &widths))));
    out.push(StyledLine::blank());

    (out, next)
}

/// Gather consecutive `|` rows from `start`, stepping over blank lines that
/// sit between rows.
fn collect_rows<'a>(lines: &[&'a str], start: usize) -> (Vec<&'a str>, usize) {
    let mut rows = Vec::new();
    let mut index = start;

    while let Some(&line) = lines.get(index) {
        if line.contains('|') {
            rows.push(line);
            index += 1;
        } else if line.trim().is_empty() {
            let resumes = lines[index..]
                .iter()
                .find(|l| !l.trim().is_empty())
                .is_some_and(|l| l.contains('|'));
            if !resumes {
                break;
            }
            index += 1;
        } else {
            break;
        }
    }

    (rows, index)
}

/// Split a row on `|`, dropping the empty fields produced by enclosing pipes.
fn split_cells(row: &str) -> Vec<String> {
    let row = row.trim();
    let mut fields: Vec<&str> = row.split('|').collect();

    if row.starts_with('|') && !fields.is_empty() {
        fields.remove(0);
    }
    if row.ends_with('|') && !fields.is_empty() {
        fields.pop();
    }

    fields.iter().map(|cell| cell.trim().to_string()).collect()
}

/// `|---|:--:|` style delimiter row.
fn is_separator(row: &str) -> bool {
    let row = row.trim();
    row.contains('-') && row.chars().all(|c| matches!(c, '-' | ':' | '|' | ' '))
}

fn column_widths(header: &[String], body: &[Vec<String>]) -> Vec<usize> {
    (0..header.len())
        .map(|column| {
            let longest = std::iter::once(header)
                .chain(body.iter().map(Vec::as_slice))
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0);
            (longest + CELL_PADDING).min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Left-justify each cell to its column width and join with `|`.
/// Missing cells are empty; cells beyond the header's columns are dropped.
fn format_row(cells: &[String], widths: &[usize]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(column, &width)| {
            let cell: String = cells
                .get(column)
                .map(|c| c.chars().take(width).collect())
                .unwrap_or_default();
            format!("{:<width$}", cell, width = width)
        })
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_minimal_table() {
        let src = lines("a|b\n--|--\nc|d");
        let (out, next) = format_table(&src, 0);

        assert_eq!(
            out,
            vec![
                StyledLine::new("a  |b  ", StyleTag::Bold),
                StyledLine::plain("-------"),
                StyledLine::plain("c  |d  "),
                StyledLine::blank(),
            ]
        );
        assert_eq!(next, 3);
    }

    #[test]
    fn test_enclosing_pipes_dropped() {
        let src = lines("| Item | Qty |\n|------|-----|\n| Tea | 2 |");
        let (out, _) = format_table(&src, 0);

        assert_eq!(out[0].text(), "Item  |Qty  ");
        assert_eq!(out[2].text(), "Tea   |2    ");
    }

    #[test]
    fn test_column_width_capped() {
        let src = lines("name|x\n-|-\nan extremely long product name|1");
        let (out, _) = format_table(&src, 0);

        let first_column = out[2].text().split('|').next().unwrap();
        assert_eq!(first_column.chars().count(), MAX_COLUMN_WIDTH);
        assert_eq!(first_column, "an extremely lo");
    }

    #[test]
    fn test_stops_at_non_table_line() {
        let src = lines("a|b\n-|-\n1|2\nafter");
        let (out, next) = format_table(&src, 0);

        assert_eq!(next, 3);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_blank_lines_inside_block_skipped() {
        let src = lines("a|b\n-|-\n\n1|2\n\nafter");
        let (out, next) = format_table(&src, 0);

        assert_eq!(out.len(), 4);
        assert_eq!(out[2].text(), "1  |2  ");
        // trailing blank before "after" is not part of the table
        assert_eq!(next, 4);
    }

    #[test]
    fn test_single_row_aborts() {
        let src = lines("just | one row\nplain text");
        let (out, next) = format_table(&src, 0);

        assert_eq!(out, vec![StyledLine::plain("just | one row")]);
        assert_eq!(next, 1);
    }

    #[test]
    fn test_short_and_long_rows() {
        let src = lines("a|b\n-|-\nonly\n1|2|3");
        let (out, _) = format_table(&src, 0);

        assert_eq!(out[2].text(), "only  |   ");
        assert_eq!(out[3].text(), "1     |2  ");
    }

    #[test]
    fn test_missing_separator_keeps_second_row() {
        let src = lines("a|b\nc|d");
        let (out, _) = format_table(&src, 0);

        assert_eq!(out[0].style(), StyleTag::Bold);
        assert_eq!(out[2].text(), "c  |d  ");
    }
}
