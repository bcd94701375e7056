//! Pipe tables
//!
//! A table run starts with a `|` line immediately followed by a separator row
//! (`|---|:--:|`). The separator is dropped; every other line becomes a
//! [`TableRow`], the first one included. Notion styles the first row as a
//! header through `has_column_header`, so the model does not mark it.
//!
//! All rows are normalised to the first row's cell count: short rows are
//! padded with empty cells, long rows are truncated.

use crate::blocks::{Table, TableRow};
use crate::inline::tokenize;

/// True if `line` can open or continue a table run.
pub fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// True if `line` is a header separator such as `|---|:---:|`.
///
/// Every cell must be dashes with optional leading/trailing colons, and
/// carry at least one dash.
pub fn is_separator_row(line: &str) -> bool {
    if !is_table_line(line) {
        return false;
    }
    let cells = split_cells(line);
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let body = cell.strip_prefix(':').unwrap_or(cell);
            let body = body.strip_suffix(':').unwrap_or(body);
            !body.is_empty() && body.chars().all(|c| c == '-')
        })
}

/// Build a table from a run of lines. The second line is the separator and
/// is skipped.
pub fn parse_table(lines: &[&str]) -> Table {
    let mut raw_rows = lines
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != 1)
        .map(|(_, line)| split_cells(line));

    let Some(header) = raw_rows.next() else {
        return Table {
            width: 0,
            rows: Vec::new(),
        };
    };
    let width = header.len();

    let rows = std::iter::once(header)
        .chain(raw_rows)
        .map(|mut cells| {
            cells.resize(width, String::new());
            TableRow {
                cells: cells.iter().map(|cell| tokenize(cell)).collect(),
            }
        })
        .collect();

    Table { width, rows }
}

/// Split a pipe row into trimmed cell strings.
///
/// The outer pipes are optional. `\|` is an escaped pipe and stays in the
/// cell as `|`.
pub fn split_cells(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = match line.strip_suffix('|') {
        Some(stripped) if !stripped.ends_with('\\') => stripped,
        _ => line,
    };

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current).trim().to_string()),
            other => current.push(other),
        }
    }
    cells.push(current.trim().to_string());
    cells
}
