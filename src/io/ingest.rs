//! Plain-text PDF ingest.
//!
//! Files are whitespace-separated numeric columns, one row per line, no header.
//! Only the first two columns (x, y) are kept.
//!
//! Rules:
//! - blank lines and `#` comment lines are ignored
//! - every data row must have the same column count, and at least 2 columns
//! - at least 2 data rows are required (weights use forward differences)

use std::fs;
use std::path::Path;

use crate::domain::PdfTable;
use crate::error::PdfError;

/// Read a two-column PDF file.
pub fn load_pdf(path: &Path) -> Result<PdfTable, PdfError> {
    let text = fs::read_to_string(path).map_err(|e| PdfError::load(path, e.to_string()))?;
    let table = parse_pdf(&text).map_err(|reason| PdfError::load(path, reason))?;

    if !table.is_strictly_increasing() {
        log::warn!("x column of '{}' is not strictly increasing", path.display());
    }
    log::debug!("loaded {} rows from '{}'", table.len(), path.display());

    Ok(table)
}

/// Parse file contents into a table. Errors are plain messages; the caller attaches the path.
pub fn parse_pdf(text: &str) -> Result<PdfTable, String> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut columns: Option<usize> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let values = line
            .split_whitespace()
            .map(|tok| {
                tok.parse::<f64>()
                    .map_err(|_| format!("line {line_no}: '{tok}' is not a number"))
            })
            .collect::<Result<Vec<f64>, String>>()?;

        match columns {
            None => {
                if values.len() < 2 {
                    return Err(format!(
                        "line {line_no}: expected at least 2 columns, found {}",
                        values.len()
                    ));
                }
                columns = Some(values.len());
            }
            Some(n) if n != values.len() => {
                return Err(format!(
                    "line {line_no}: expected {n} columns, found {}",
                    values.len()
                ));
            }
            Some(_) => {}
        }

        x.push(values[0]);
        y.push(values[1]);
    }

    if x.len() < 2 {
        return Err(format!("expected at least 2 data rows, found {}", x.len()));
    }

    PdfTable::new(x, y).map_err(|e| e.to_string())
}
