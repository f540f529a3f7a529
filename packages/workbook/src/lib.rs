#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Typed worksheet grids for the ANPR survey workbooks.
//!
//! The ingestor only ever sees a grid of typed cells addressed by row and
//! column; how that grid got off disk is this crate's problem. Survey
//! workbooks are exported upstream as one CSV file per worksheet (the file
//! stem is the sheet title), and [`csv_dir::load_dir`] loads such a
//! directory back into a [`Workbook`] with per-cell type inference.

pub mod csv_dir;

use chrono::NaiveDateTime;

/// Errors loading a workbook from disk.
#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    /// Filesystem error while scanning or reading sheet files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV content in a sheet file.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Blank cell.
    Empty,
    /// Free text.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Date-time value.
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Returns whether this cell is blank.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// One worksheet: a title and a dense grid of typed cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    /// Sheet title (for survey workbooks, the camera identifier).
    pub title: String,
    rows: Vec<Vec<Cell>>,
}

impl Worksheet {
    /// Creates a worksheet from a grid of rows.
    #[must_use]
    pub const fn new(title: String, rows: Vec<Vec<Cell>>) -> Self {
        Self { title, rows }
    }

    /// Returns the cell at the given 0-based row and column.
    ///
    /// Addresses outside the grid read as [`Cell::Empty`] — short rows are
    /// common in the exports and blank means blank.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&Cell::Empty)
    }

    /// Number of rows in the grid.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// An ordered collection of worksheets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    /// The worksheets, in load order.
    pub sheets: Vec<Worksheet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_cells_read_empty() {
        let sheet = Worksheet::new(
            "07".to_string(),
            vec![vec![Cell::Text("a".to_string())], vec![]],
        );
        assert_eq!(sheet.cell(0, 0), &Cell::Text("a".to_string()));
        assert!(sheet.cell(0, 5).is_empty());
        assert!(sheet.cell(1, 0).is_empty());
        assert!(sheet.cell(99, 99).is_empty());
    }
}
