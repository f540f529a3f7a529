//! The windowed delta query.

use anpr_map_anpr_models::VehicleClass;
use anpr_map_trajectory_models::{CaptureDeltaRow, TrajectoryWindow, VehicleTrajectory};
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};

use crate::TrajectoryError;

/// Selects capture rows with per-capture deltas for every vehicle whose
/// first capture is strictly before the window's end bound.
///
/// Rows come back ordered by `(vehicle_id, ts, id)` — the same key the
/// `LAG` window uses, so delta order and emitted-geometry order are one
/// sort. Vehicles are never truncated: once selected, all their captures
/// are returned even past the window.
///
/// # Errors
///
/// Returns [`TrajectoryError`] if the query fails or a row cannot be
/// decoded.
pub async fn capture_deltas(
    db: &dyn Database,
    window: TrajectoryWindow,
) -> Result<Vec<CaptureDeltaRow>, TrajectoryError> {
    let rows = db
        .query_raw_params(
            "WITH first_captures AS (
                 SELECT vehicle_id, MIN(ts) AS first_ts
                 FROM captures
                 GROUP BY vehicle_id
             )
             SELECT c.id AS capture_id,
                    c.vehicle_id,
                    v.class,
                    c.ts,
                    ST_X(cam.location::geometry) AS longitude,
                    ST_Y(cam.location::geometry) AS latitude,
                    COALESCE(EXTRACT(EPOCH FROM c.ts - LAG(c.ts) OVER w), 0)::float8
                        AS seconds_delta,
                    COALESCE(ST_Distance(cam.location, LAG(cam.location) OVER w), 0)::float8
                        AS metres_delta
             FROM captures c
             JOIN first_captures f ON f.vehicle_id = c.vehicle_id
             JOIN vehicles v ON v.id = c.vehicle_id
             JOIN cameras cam ON cam.id = c.camera_id
             WHERE f.first_ts < $1
             WINDOW w AS (PARTITION BY c.vehicle_id ORDER BY c.ts, c.id)
             ORDER BY c.vehicle_id, c.ts, c.id",
            &[DatabaseValue::DateTime(window.end_bound())],
        )
        .await?;

    let mut deltas = Vec::with_capacity(rows.len());

    for row in &rows {
        let class_name: String = row.to_value("class").unwrap_or_default();
        let class = class_name
            .parse::<VehicleClass>()
            .map_err(|_| TrajectoryError::Conversion {
                message: format!("Unknown vehicle class in database: {class_name:?}"),
            })?;

        deltas.push(CaptureDeltaRow {
            vehicle_id: row.to_value("vehicle_id").unwrap_or(0),
            class,
            ts: row.to_value("ts").unwrap_or_default(),
            longitude: row.to_value("longitude").unwrap_or(0.0),
            latitude: row.to_value("latitude").unwrap_or(0.0),
            seconds_delta: row.to_value("seconds_delta").unwrap_or(0.0),
            metres_delta: row.to_value("metres_delta").unwrap_or(0.0),
        });
    }

    Ok(deltas)
}

/// Reconstructs the trajectories for every vehicle selected by `window`.
///
/// # Errors
///
/// Returns [`TrajectoryError`] if the underlying query fails.
pub async fn trajectories(
    db: &dyn Database,
    window: TrajectoryWindow,
) -> Result<Vec<VehicleTrajectory>, TrajectoryError> {
    let rows = capture_deltas(db, window).await?;
    let trajectories = crate::fold::fold_rows(&rows);
    log::debug!(
        "window ending {}: {} captures across {} vehicles",
        window.end_bound(),
        rows.len(),
        trajectories.len()
    );
    Ok(trajectories)
}
