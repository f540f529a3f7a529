//! Capture-event assembly.
//!
//! Turns a decoded chain into the ordered sequence of absolute-timestamped
//! sightings that gets persisted as capture rows. Elapsed minutes are
//! applied at millisecond precision so fractional values (`4.5` minutes =
//! 4 m 30 s) accumulate without drift.

use anpr_map_anpr_models::Direction;
use chrono::NaiveDateTime;

use crate::decode::ChainSegment;

/// One sighting of a vehicle: which camera, which direction, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureEvent {
    /// Camera identifier.
    pub camera: String,
    /// Direction of travel past the camera.
    pub direction: Direction,
    /// Absolute timestamp of the sighting.
    pub ts: NaiveDateTime,
}

/// Assembles the capture events for one trip.
///
/// The first event is the starting camera at `start`; each subsequent
/// event adds the corresponding segment's elapsed minutes to the previous
/// event's timestamp. Camera existence is not checked here — the captures
/// table's foreign key enforces it at insert time.
#[must_use]
pub fn assemble(
    start: NaiveDateTime,
    camera: &str,
    direction: Direction,
    segments: &[ChainSegment],
) -> Vec<CaptureEvent> {
    let mut events = Vec::with_capacity(segments.len() + 1);
    events.push(CaptureEvent {
        camera: camera.to_string(),
        direction,
        ts: start,
    });

    let mut ts = start;
    for segment in segments {
        ts += elapsed(segment.elapsed_minutes);
        events.push(CaptureEvent {
            camera: segment.camera.clone(),
            direction: segment.direction,
            ts,
        });
    }

    events
}

/// Converts fractional elapsed minutes to a [`chrono::Duration`] at
/// millisecond resolution.
#[allow(clippy::cast_possible_truncation)]
fn elapsed(minutes: f64) -> chrono::Duration {
    chrono::Duration::milliseconds((minutes * 60_000.0).round() as i64)
}
