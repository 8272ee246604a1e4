//! Plain comma-separated parsing of per-site observation files.
//!
//! Files are simple exports: a header row, then one row per sampling date.
//! A cell may be wrapped in double quotes, which are stripped, but quoted
//! cells cannot contain commas or further quotes. Rows breaking that rule
//! are rejected rather than split into misaligned columns.

use std::path::Path;

use chrono::NaiveDate;
use hydrofill_calendar::parse_date;
use hydrofill_gapfill::Quantity;

use crate::error::IoError;
use crate::mapping::ColumnMapping;

/// Cell contents that mean "no sample".
const MISSING_TOKENS: [&str; 5] = ["", "na", "nan", "null", "n/a"];

/// One parsed data row.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SiteRow {
    pub date: NaiveDate,
    /// Scaled samples present on this row.
    pub samples: Vec<(Quantity, f64)>,
}

/// All rows of a site file plus which mapped columns were found.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SiteTable {
    pub rows: Vec<SiteRow>,
    /// Mapped headers absent from the file.
    pub missing_columns: Vec<String>,
}

fn clean(cell: &str) -> Option<&str> {
    let cell = cell.trim();
    let inner = match cell.strip_prefix('"') {
        Some(rest) => rest.strip_suffix('"')?,
        None => cell,
    };
    (!inner.contains('"')).then(|| inner.trim())
}

/// Splits a row on commas, or returns a reason when quoting makes the split
/// ambiguous.
fn split_row(line: &str) -> Result<Vec<&str>, String> {
    line.split(',')
        .map(|cell| {
            clean(cell).ok_or_else(|| {
                format!("unbalanced or embedded quote near '{}'", cell.trim())
            })
        })
        .collect()
}

fn is_missing(cell: &str) -> bool {
    MISSING_TOKENS.iter().any(|t| cell.eq_ignore_ascii_case(t))
}

/// Parses the text of one site file.
///
/// # Errors
///
/// Returns [`IoError::MissingColumn`] if the header lacks the date column,
/// or [`IoError::MalformedRow`] for an unparsable date or number.
pub(crate) fn parse_site_csv(
    text: &str,
    path: &Path,
    mapping: &ColumnMapping,
) -> Result<SiteTable, IoError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((header_idx, header)) = lines.next() else {
        return Err(IoError::MissingColumn {
            column: mapping.date_column().to_string(),
            path: path.to_path_buf(),
        });
    };
    let headers = split_row(header).map_err(|reason| IoError::MalformedRow {
        path: path.to_path_buf(),
        line: header_idx + 1,
        reason,
    })?;
    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let date_idx = find(mapping.date_column()).ok_or_else(|| IoError::MissingColumn {
        column: mapping.date_column().to_string(),
        path: path.to_path_buf(),
    })?;

    let mut present = Vec::new();
    let mut missing_columns = Vec::new();
    for spec in mapping.columns() {
        match find(spec.header()) {
            Some(idx) => present.push((idx, spec)),
            None => missing_columns.push(spec.header().to_string()),
        }
    }

    let mut rows = Vec::new();
    for (i, line) in lines {
        let line_no = i + 1;
        let malformed = |reason: String| IoError::MalformedRow {
            path: path.to_path_buf(),
            line: line_no,
            reason,
        };
        let fields = split_row(line).map_err(&malformed)?;

        let date_cell = fields.get(date_idx).copied().unwrap_or("");
        let date = parse_date(date_cell).map_err(|e| malformed(e.to_string()))?;

        let mut samples = Vec::with_capacity(present.len());
        for &(idx, spec) in &present {
            let cell = fields.get(idx).copied().unwrap_or("");
            if is_missing(cell) {
                continue;
            }
            let raw: f64 = cell.parse().map_err(|_| {
                malformed(format!(
                    "invalid number '{cell}' in column '{}'",
                    spec.header()
                ))
            })?;
            samples.push((spec.quantity(), raw * spec.scale()));
        }
        rows.push(SiteRow { date, samples });
    }

    Ok(SiteTable {
        rows,
        missing_columns,
    })
}
