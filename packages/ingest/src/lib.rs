#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library for ingesting ANPR survey workbooks into the journey database.
//!
//! One worksheet holds one camera's trip records. Each data row is
//! validated, its destinations chain decoded and assembled into capture
//! events, and the resulting vehicle + capture rows written inside a
//! per-sheet transaction — a failed row aborts and rolls back its whole
//! sheet, never leaving a partially-loaded camera behind. Other sheets
//! are unaffected.

pub mod cameras;

use anpr_map_anpr_models::VehicleClass;
use anpr_map_chain::assemble::{CaptureEvent, assemble};
use anpr_map_chain::{ChainError, decode::decode};
use anpr_map_database::{DbError, queries};
use anpr_map_database_models::NewCapture;
use anpr_map_workbook::{Cell, Workbook, Worksheet};
use chrono::NaiveDateTime;
use switchy_database::Database;

/// First data row of a survey worksheet (0-based; spreadsheet row 12).
pub const DATA_START_ROW: usize = 11;

/// Location of the embedded camera-identity cell (0-based; spreadsheet
/// cell C4).
pub const IDENTITY_ROW: usize = 3;
/// Column of the embedded camera-identity cell.
pub const IDENTITY_COL: usize = 2;

/// Data columns (0-based; spreadsheet columns B–F).
pub const TIMESTAMP_COL: usize = 1;
/// Vehicle class column.
pub const CLASS_COL: usize = 2;
/// Total trip minutes column. Informational only — the per-hop elapsed
/// times in the destinations column are what the captures derive from.
pub const TOTAL_MINUTES_COL: usize = 3;
/// Chain column (camera/direction sequence without elapsed times).
pub const CHAIN_COL: usize = 4;
/// Destinations-with-times column — the cell the decoder consumes.
pub const DESTINATIONS_COL: usize = 5;

/// Timestamp format used when the export renders date-times as text.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Workbook pages that never hold camera data.
pub const EXCLUDED_SHEETS: &[&str] = &["Cover", "Contents", "Summary", "Notes", "Location Plan"];

/// Errors that abort a sheet's ingestion. Row numbers are 1-based
/// spreadsheet rows.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The sheet's title does not match its embedded identity cell.
    #[error("sheet {sheet:?}: identity cell declares camera {found:?}")]
    SheetIdentityMismatch {
        /// Sheet title.
        sheet: String,
        /// What the identity cell held.
        found: String,
    },

    /// The timestamp cell holds a value that is not a date/time.
    #[error("row {row}: timestamp cell holds {found}, not a date/time")]
    TimestampType {
        /// Spreadsheet row number.
        row: usize,
        /// Description of the offending value.
        found: String,
    },

    /// The destinations chain could not be decoded.
    #[error("row {row}: {source}")]
    ChainDirection {
        /// Spreadsheet row number.
        row: usize,
        /// The decode failure.
        source: ChainError,
    },

    /// The destinations chain decoded to zero hops. Every recorded trip
    /// covers at least two cameras, so this means corrupt data.
    #[error("row {row}: chain yielded no destinations")]
    NoDestinations {
        /// Spreadsheet row number.
        row: usize,
    },

    /// The vehicle class text is not one of the known classes.
    #[error("row {row}: unknown vehicle class {found:?}")]
    UnknownVehicleClass {
        /// Spreadsheet row number.
        row: usize,
        /// The class text from the sheet.
        found: String,
    },

    /// Database failure (including referential-integrity violations).
    #[error(transparent)]
    Database(#[from] DbError),
}

/// One validated data row, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTrip {
    /// Vehicle classification.
    pub class: VehicleClass,
    /// The trip's capture events, in sighting order.
    pub events: Vec<CaptureEvent>,
}

/// Ingests every camera sheet of a workbook, skipping the non-camera
/// pages. A sheet that fails is rolled back and logged; the remaining
/// sheets still load. Returns the total number of rows processed.
pub async fn ingest_workbook(db: &dyn Database, workbook: &Workbook) -> u64 {
    let mut total = 0u64;

    for sheet in &workbook.sheets {
        if is_excluded(&sheet.title) {
            log::debug!("skipping non-camera sheet {:?}", sheet.title);
            continue;
        }

        log::info!("loading camera {:?}", sheet.title);
        match ingest_sheet(db, sheet).await {
            Ok(count) => {
                total += count;
                log::info!("camera {:?}: {count} rows loaded", sheet.title);
            }
            Err(e) => {
                log::error!("camera {:?}: sheet aborted: {e}", sheet.title);
            }
        }
    }

    total
}

/// Ingests one camera worksheet inside a single transaction.
///
/// The identity cross-check runs before any row. Every row's vehicle is
/// inserted (and its generated id obtained) before that vehicle's
/// captures. On any error the transaction is rolled back and the error
/// returned — the sheet is all-or-nothing.
///
/// # Errors
///
/// Returns [`IngestError`] for the first structural or database failure.
pub async fn ingest_sheet(db: &dyn Database, sheet: &Worksheet) -> Result<u64, IngestError> {
    let camera = check_sheet_identity(sheet)?;

    let txn = db.begin_transaction().await.map_err(DbError::from)?;

    match ingest_rows(txn.as_ref(), sheet, &camera).await {
        Ok(count) => {
            txn.commit().await.map_err(DbError::from)?;
            Ok(count)
        }
        Err(e) => {
            txn.rollback().await.map_err(DbError::from)?;
            Err(e)
        }
    }
}

async fn ingest_rows(
    db: &dyn Database,
    sheet: &Worksheet,
    camera: &str,
) -> Result<u64, IngestError> {
    let mut processed = 0u64;

    for row in DATA_START_ROW..sheet.row_count() {
        let Some(trip) = parse_row(sheet, row, camera)? else {
            continue;
        };

        let vehicle_id = queries::insert_vehicle(db, trip.class).await?;
        let captures: Vec<NewCapture> = trip
            .events
            .iter()
            .map(|event| NewCapture {
                camera_id: event.camera.clone(),
                direction: event.direction,
                ts: event.ts,
            })
            .collect();
        queries::insert_captures(db, vehicle_id, &captures).await?;

        processed += 1;
    }

    Ok(processed)
}

/// Parses and validates one data row. Returns `Ok(None)` for blank rows
/// (empty timestamp cell), which are skipped with a notice rather than
/// treated as errors.
///
/// # Errors
///
/// Returns [`IngestError`] for a wrong-typed timestamp, unknown vehicle
/// class, or undecodable destinations chain.
pub fn parse_row(
    sheet: &Worksheet,
    row: usize,
    camera: &str,
) -> Result<Option<ParsedTrip>, IngestError> {
    let row_no = row + 1;

    let start = match sheet.cell(row, TIMESTAMP_COL) {
        Cell::Empty => {
            log::debug!(
                "sheet {:?} row {row_no}: blank timestamp, skipping",
                sheet.title
            );
            return Ok(None);
        }
        Cell::DateTime(dt) => *dt,
        Cell::Text(text) => NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|_| {
            IngestError::TimestampType {
                row: row_no,
                found: format!("unparseable text {text:?}"),
            }
        })?,
        cell @ Cell::Number(_) => {
            return Err(IngestError::TimestampType {
                row: row_no,
                found: describe_cell(cell),
            });
        }
    };

    let class_text = match sheet.cell(row, CLASS_COL) {
        Cell::Text(text) => text.clone(),
        cell => describe_cell(cell),
    };
    let class: VehicleClass =
        class_text
            .parse()
            .map_err(|_| IngestError::UnknownVehicleClass {
                row: row_no,
                found: class_text.clone(),
            })?;

    let destinations = match sheet.cell(row, DESTINATIONS_COL) {
        Cell::Text(text) => text.clone(),
        Cell::Empty => return Err(IngestError::NoDestinations { row: row_no }),
        cell => describe_cell(cell),
    };

    let decoded = match decode(&destinations) {
        Ok(decoded) => decoded,
        Err(ChainError::Empty { .. }) => {
            return Err(IngestError::NoDestinations { row: row_no });
        }
        Err(source) => {
            return Err(IngestError::ChainDirection {
                row: row_no,
                source,
            });
        }
    };

    let events = assemble(start, camera, decoded.initial_direction, &decoded.segments);

    Ok(Some(ParsedTrip { class, events }))
}

/// Cross-checks the sheet title against the embedded identity cell,
/// returning the camera id to ingest under.
///
/// # Errors
///
/// Returns [`IngestError::SheetIdentityMismatch`] if they disagree.
pub fn check_sheet_identity(sheet: &Worksheet) -> Result<String, IngestError> {
    let declared = sheet.title.trim();
    let embedded = identity_cell_text(sheet.cell(IDENTITY_ROW, IDENTITY_COL));

    if camera_ids_match(declared, &embedded) {
        Ok(declared.to_string())
    } else {
        Err(IngestError::SheetIdentityMismatch {
            sheet: declared.to_string(),
            found: embedded,
        })
    }
}

/// Renders the identity cell as camera-id text. Spreadsheets sometimes
/// store bare numeric ids ("7" for camera "07"), which arrive as numbers.
fn identity_cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => text.trim().to_string(),
        #[allow(clippy::cast_possible_truncation)]
        Cell::Number(n) => format!("{}", *n as i64),
        Cell::Empty | Cell::DateTime(_) => String::new(),
    }
}

/// Compares two camera ids, allowing a leading-zero variant
/// (`"07"` matches `"7"`; `"35A"` only matches `"35A"`).
fn camera_ids_match(a: &str, b: &str) -> bool {
    fn strip(s: &str) -> &str {
        let stripped = s.trim_start_matches('0');
        if stripped.is_empty() { "0" } else { stripped }
    }

    !a.is_empty()
        && !b.is_empty()
        && strip(a).eq_ignore_ascii_case(strip(b))
}

fn is_excluded(title: &str) -> bool {
    EXCLUDED_SHEETS
        .iter()
        .any(|excluded| excluded.eq_ignore_ascii_case(title.trim()))
}

fn describe_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => "empty cell".to_string(),
        Cell::Text(text) => format!("text {text:?}"),
        Cell::Number(n) => format!("number {n}"),
        Cell::DateTime(dt) => format!("date-time {dt}"),
    }
}

#[cfg(test)]
mod tests {
    use anpr_map_anpr_models::Direction;

    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    /// Builds a camera sheet with the identity cell in place and the
    /// given data rows starting at the data offset.
    fn camera_sheet(title: &str, identity: Cell, data_rows: Vec<Vec<Cell>>) -> Worksheet {
        let mut rows: Vec<Vec<Cell>> = (0..DATA_START_ROW).map(|_| Vec::new()).collect();
        rows[IDENTITY_ROW] = vec![Cell::Empty, Cell::Empty, identity];
        rows.extend(data_rows);
        Worksheet::new(title.to_string(), rows)
    }

    fn data_row(timestamp: Cell, class: &str, destinations: &str) -> Vec<Cell> {
        let destinations_cell = if destinations.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(destinations.to_string())
        };
        vec![
            Cell::Empty,
            timestamp,
            Cell::Text(class.to_string()),
            Cell::Number(14.5),
            Cell::Text("X07_N>12_S>15_E".to_string()),
            destinations_cell,
        ]
    }

    #[test]
    fn identity_accepts_leading_zero_variants() {
        assert!(camera_ids_match("07", "07"));
        assert!(camera_ids_match("07", "7"));
        assert!(camera_ids_match("7", "07"));
        assert!(camera_ids_match("35A", "35a"));
        assert!(!camera_ids_match("07", "08"));
        assert!(!camera_ids_match("35A", "35B"));
        assert!(!camera_ids_match("07", ""));
    }

    #[test]
    fn identity_mismatch_fails_the_sheet() {
        let sheet = camera_sheet("07", Cell::Text("12".to_string()), vec![]);
        assert!(matches!(
            check_sheet_identity(&sheet),
            Err(IngestError::SheetIdentityMismatch { .. })
        ));
    }

    #[test]
    fn identity_accepts_numeric_cell() {
        let sheet = camera_sheet("07", Cell::Number(7.0), vec![]);
        assert_eq!(check_sheet_identity(&sheet).unwrap(), "07");
    }

    #[test]
    fn blank_timestamp_rows_are_skipped() {
        let sheet = camera_sheet(
            "07",
            Cell::Text("07".to_string()),
            vec![data_row(Cell::Empty, "Car", "X07_N>12_S(4.5)")],
        );
        assert_eq!(parse_row(&sheet, DATA_START_ROW, "07").unwrap(), None);
    }

    #[test]
    fn parses_worked_example_row() {
        let sheet = camera_sheet(
            "07",
            Cell::Text("07".to_string()),
            vec![data_row(
                Cell::DateTime(ts("2017-06-10 08:00:00")),
                "Car",
                "X07_N>12_S(4.5)>15_E(10)",
            )],
        );

        let trip = parse_row(&sheet, DATA_START_ROW, "07").unwrap().unwrap();
        assert_eq!(trip.class, VehicleClass::Car);
        assert_eq!(trip.events.len(), 3);
        assert_eq!(trip.events[0].camera, "07");
        assert_eq!(trip.events[0].direction, Direction::N);
        assert_eq!(trip.events[0].ts, ts("2017-06-10 08:00:00"));
        assert_eq!(trip.events[1].ts, ts("2017-06-10 08:04:30"));
        assert_eq!(trip.events[2].ts, ts("2017-06-10 08:14:30"));
    }

    #[test]
    fn text_timestamps_use_the_export_format() {
        let sheet = camera_sheet(
            "07",
            Cell::Text("07".to_string()),
            vec![data_row(
                Cell::Text("10/06/2017 08:00:00".to_string()),
                "Taxi",
                "X07_N>12_S(4.5)",
            )],
        );

        let trip = parse_row(&sheet, DATA_START_ROW, "07").unwrap().unwrap();
        assert_eq!(trip.events[0].ts, ts("2017-06-10 08:00:00"));
    }

    #[test]
    fn wrong_typed_timestamp_is_an_error() {
        let numeric = camera_sheet(
            "07",
            Cell::Text("07".to_string()),
            vec![data_row(Cell::Number(42.0), "Car", "X07_N>12_S(4.5)")],
        );
        assert!(matches!(
            parse_row(&numeric, DATA_START_ROW, "07"),
            Err(IngestError::TimestampType { .. })
        ));

        let garbage = camera_sheet(
            "07",
            Cell::Text("07".to_string()),
            vec![data_row(
                Cell::Text("not a date".to_string()),
                "Car",
                "X07_N>12_S(4.5)",
            )],
        );
        assert!(matches!(
            parse_row(&garbage, DATA_START_ROW, "07"),
            Err(IngestError::TimestampType { .. })
        ));
    }

    #[test]
    fn unknown_vehicle_class_is_an_error() {
        let sheet = camera_sheet(
            "07",
            Cell::Text("07".to_string()),
            vec![data_row(
                Cell::DateTime(ts("2017-06-10 08:00:00")),
                "Bicycle",
                "X07_N>12_S(4.5)",
            )],
        );
        assert!(matches!(
            parse_row(&sheet, DATA_START_ROW, "07"),
            Err(IngestError::UnknownVehicleClass { .. })
        ));
    }

    #[test]
    fn malformed_chain_is_a_direction_error() {
        let sheet = camera_sheet(
            "07",
            Cell::Text("07".to_string()),
            vec![data_row(
                Cell::DateTime(ts("2017-06-10 08:00:00")),
                "Car",
                "no direction marker",
            )],
        );
        assert!(matches!(
            parse_row(&sheet, DATA_START_ROW, "07"),
            Err(IngestError::ChainDirection { .. })
        ));
    }

    #[test]
    fn chain_with_no_hops_is_no_destinations() {
        let sheet = camera_sheet(
            "07",
            Cell::Text("07".to_string()),
            vec![data_row(
                Cell::DateTime(ts("2017-06-10 08:00:00")),
                "Car",
                "X07_N>",
            )],
        );
        assert!(matches!(
            parse_row(&sheet, DATA_START_ROW, "07"),
            Err(IngestError::NoDestinations { .. })
        ));

        let blank = camera_sheet(
            "07",
            Cell::Text("07".to_string()),
            vec![data_row(
                Cell::DateTime(ts("2017-06-10 08:00:00")),
                "Car",
                "",
            )],
        );
        assert!(matches!(
            parse_row(&blank, DATA_START_ROW, "07"),
            Err(IngestError::NoDestinations { .. })
        ));
    }

    #[test]
    fn non_camera_pages_are_excluded() {
        assert!(is_excluded("Cover"));
        assert!(is_excluded("location plan"));
        assert!(is_excluded(" Summary "));
        assert!(!is_excluded("07"));
        assert!(!is_excluded("35A"));
    }
}
