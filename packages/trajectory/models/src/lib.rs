#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Types for the trajectory query pipeline.

use anpr_map_anpr_models::VehicleClass;
use chrono::{NaiveDate, NaiveDateTime, Timelike as _};
use serde::{Deserialize, Serialize};

/// A calendar-day + hour-of-day query window.
///
/// Selection is driven by the window's end bound: a vehicle appears iff
/// its first capture is strictly before it, and then appears in full.
/// The start bound is what callers iterate over (the by-hour API) and
/// what [`VehicleTrajectory::start_offset`] aligns trips within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryWindow {
    start: NaiveDateTime,
}

impl TrajectoryWindow {
    /// Creates the window covering `hour` (0–23) on `day`.
    ///
    /// Returns `None` if `hour` is out of range.
    #[must_use]
    pub fn new(day: NaiveDate, hour: u32) -> Option<Self> {
        day.and_hms_opt(hour, 0, 0).map(|start| Self { start })
    }

    /// Inclusive start of the window (top of the hour).
    #[must_use]
    pub const fn start_bound(self) -> NaiveDateTime {
        self.start
    }

    /// Exclusive end of the window (top of the next hour).
    #[must_use]
    pub fn end_bound(self) -> NaiveDateTime {
        self.start + chrono::Duration::hours(1)
    }
}

/// One capture row as returned by the windowed delta query: the capture's
/// coordinates plus its elapsed-seconds and great-circle-metres deltas
/// against the vehicle's previous capture (both 0 for the first capture).
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureDeltaRow {
    /// Owning vehicle identity.
    pub vehicle_id: i32,
    /// Vehicle classification.
    pub class: VehicleClass,
    /// Capture timestamp.
    pub ts: NaiveDateTime,
    /// Camera longitude (WGS84).
    pub longitude: f64,
    /// Camera latitude (WGS84).
    pub latitude: f64,
    /// Wall-clock seconds since the previous capture.
    pub seconds_delta: f64,
    /// Great-circle metres from the previous capture's camera.
    pub metres_delta: f64,
}

/// One vehicle's reconstructed journey: the ordered path geometry plus
/// parallel per-point arrays of timestamps and cumulative time/distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTrajectory {
    /// Vehicle identity.
    pub vehicle_id: i32,
    /// Vehicle classification.
    pub vehicle_class: VehicleClass,
    /// `(longitude, latitude)` of each capture, in capture order.
    pub path: Vec<(f64, f64)>,
    /// Capture timestamps, parallel to `path`.
    pub timestamps: Vec<NaiveDateTime>,
    /// Cumulative elapsed seconds since the first capture, parallel to
    /// `path`. Always starts at 0.
    pub cum_seconds: Vec<f64>,
    /// Cumulative great-circle metres travelled, parallel to `path`.
    /// Always starts at 0.
    pub cum_metres: Vec<f64>,
    /// Seconds past the top of the hour for the first capture
    /// (`minute * 60 + second`). Presentation alignment only.
    pub start_offset: u32,
}

impl VehicleTrajectory {
    /// Seconds past the top of the hour for a capture timestamp.
    #[must_use]
    pub fn offset_within_hour(ts: NaiveDateTime) -> u32 {
        ts.minute() * 60 + ts.second()
    }
}
