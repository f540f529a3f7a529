#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Row types crossing the ANPR journey database boundary.
//!
//! These are the shapes of data as stored in and retrieved from the
//! PostGIS schema: `cameras` (static reference geometry), `vehicles` (one
//! row per observed trip-chain instance) and `captures` (one row per
//! camera sighting).

use anpr_map_anpr_models::{Direction, VehicleClass};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A camera reference-data row. Loaded once from geometry metadata at
/// setup time, only ever looked up afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraRecord {
    /// Camera identifier, e.g. `"07"` or `"35A"`.
    pub id: String,
    /// Free-text description from the geometry metadata.
    pub description: Option<String>,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Latitude (WGS84).
    pub latitude: f64,
}

/// A vehicle row as retrieved from the database. One row per parsed
/// chain — not a persistent real-world vehicle identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    /// Database-generated identity.
    pub id: i32,
    /// Vehicle classification.
    pub class: VehicleClass,
}

/// A capture row about to be inserted. The owning vehicle's identity is
/// supplied separately — it does not exist until the vehicle row has been
/// inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCapture {
    /// Camera that made the sighting.
    pub camera_id: String,
    /// Direction of travel past the camera.
    pub direction: Direction,
    /// Absolute timestamp of the sighting.
    pub ts: NaiveDateTime,
}
