//! CSV-directory workbook loading.
//!
//! Each `<title>.csv` in the directory becomes one worksheet. Cells carry
//! no type information in CSV, so types are inferred per value: blank →
//! empty, any of the export's date-time formats → date-time, numeric →
//! number, everything else text.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::{Cell, Workbook, WorkbookError, Worksheet};

/// Date-time formats seen in the survey exports, tried in order. The
/// `%d/%m/%Y` form is what the spreadsheets themselves use; the ISO forms
/// appear in re-exported data.
const DATE_TIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Loads every `*.csv` file in `dir` as a worksheet, in file-name order.
///
/// # Errors
///
/// Returns [`WorkbookError`] if the directory cannot be read or a sheet
/// file contains malformed CSV.
pub fn load_dir(dir: &Path) -> Result<Workbook, WorkbookError> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    paths.sort();

    let mut sheets = Vec::with_capacity(paths.len());
    for path in paths {
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = std::fs::File::open(&path)?;
        let sheet = sheet_from_reader(title, file)?;
        log::debug!(
            "loaded sheet {:?} ({} rows) from {}",
            sheet.title,
            sheet.row_count(),
            path.display()
        );
        sheets.push(sheet);
    }

    Ok(Workbook { sheets })
}

/// Reads one worksheet's CSV content from any reader.
///
/// # Errors
///
/// Returns [`WorkbookError`] if the CSV content is malformed.
pub fn sheet_from_reader<R: Read>(title: String, reader: R) -> Result<Worksheet, WorkbookError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(infer_cell).collect());
    }

    Ok(Worksheet::new(title, rows))
}

/// Infers the typed value of one raw CSV field.
fn infer_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Cell::DateTime(dt);
        }
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return Cell::Number(n);
    }
    Cell::Text(trimmed.to_string())
}
