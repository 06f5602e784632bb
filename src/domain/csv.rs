//! CSV rendering for flattened hierarchies
//!
//! Cells containing a comma, double quote or `\n` are wrapped in double
//! quotes with internal quotes doubled. All other cells are written verbatim.

use std::borrow::Cow;

use crate::domain::entities::{Row, HEADER};
use crate::domain::error::DomainError;

/// Byte-order mark for spreadsheet consumers.
pub const BOM: &str = "\u{FEFF}";

/// Row separator.
pub const LINE_SEPARATOR: &str = "\n";

fn needs_quoting(cell: &str) -> bool {
    cell.contains([',', '"', '\n'])
}

/// Escape a single cell.
pub fn escape_cell(cell: &str) -> Cow<'_, str> {
    if needs_quoting(cell) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Reverse `escape_cell` for a single cell.
pub fn unescape_cell(cell: &str) -> Result<String, DomainError> {
    let Some(inner) = cell.strip_prefix('"') else {
        if cell.contains('"') {
            return Err(DomainError::MalformedCell(cell.to_string()));
        }
        return Ok(cell.to_string());
    };
    let inner = inner
        .strip_suffix('"')
        .ok_or_else(|| DomainError::MalformedCell(cell.to_string()))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '"' {
            // quotes inside a quoted cell always come in pairs
            if chars.next() != Some('"') {
                return Err(DomainError::MalformedCell(cell.to_string()));
            }
        }
        out.push(c);
    }
    Ok(out)
}

/// Render a single row as a CSV line (no separator).
pub fn render_row(row: &Row) -> String {
    row.cells()
        .iter()
        .map(|c| escape_cell(c))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render header plus rows, joined by `\n`, without a trailing separator.
pub fn render_csv(rows: &[Row]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(HEADER.join(","));
    lines.extend(rows.iter().map(render_row));
    lines.join(LINE_SEPARATOR)
}
