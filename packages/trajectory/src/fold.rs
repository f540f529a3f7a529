//! Pure fold of ordered delta rows into per-vehicle trajectories.

use anpr_map_trajectory_models::{CaptureDeltaRow, VehicleTrajectory};

/// Folds rows (already ordered by `(vehicle_id, ts, id)`) into one
/// [`VehicleTrajectory`] per vehicle, accumulating the prefix sums of the
/// time and distance deltas.
#[must_use]
pub fn fold_rows(rows: &[CaptureDeltaRow]) -> Vec<VehicleTrajectory> {
    let mut trajectories: Vec<VehicleTrajectory> = Vec::new();

    for row in rows {
        let same_vehicle = trajectories
            .last()
            .is_some_and(|t| t.vehicle_id == row.vehicle_id);

        if !same_vehicle {
            trajectories.push(VehicleTrajectory {
                vehicle_id: row.vehicle_id,
                vehicle_class: row.class,
                path: Vec::new(),
                timestamps: Vec::new(),
                cum_seconds: Vec::new(),
                cum_metres: Vec::new(),
                start_offset: VehicleTrajectory::offset_within_hour(row.ts),
            });
        }

        let Some(current) = trajectories.last_mut() else {
            continue;
        };

        let cum_seconds = current.cum_seconds.last().copied().unwrap_or(0.0) + row.seconds_delta;
        let cum_metres = current.cum_metres.last().copied().unwrap_or(0.0) + row.metres_delta;

        current.path.push((row.longitude, row.latitude));
        current.timestamps.push(row.ts);
        current.cum_seconds.push(cum_seconds);
        current.cum_metres.push(cum_metres);
    }

    trajectories
}

#[cfg(test)]
mod tests {
    use anpr_map_anpr_models::VehicleClass;
    use chrono::NaiveDateTime;

    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn row(
        vehicle_id: i32,
        when: &str,
        lng: f64,
        lat: f64,
        seconds_delta: f64,
        metres_delta: f64,
    ) -> CaptureDeltaRow {
        CaptureDeltaRow {
            vehicle_id,
            class: VehicleClass::Car,
            ts: ts(when),
            longitude: lng,
            latitude: lat,
            seconds_delta,
            metres_delta,
        }
    }

    #[test]
    fn accumulates_prefix_sums() {
        // Three captures: B is 1000 m / 300 s from A; C shares B's
        // location 300 s later.
        let rows = vec![
            row(1, "2017-06-10 08:00:00", 0.10, 52.20, 0.0, 0.0),
            row(1, "2017-06-10 08:05:00", 0.11, 52.21, 300.0, 1000.0),
            row(1, "2017-06-10 08:10:00", 0.11, 52.21, 300.0, 0.0),
        ];

        let trajectories = fold_rows(&rows);
        assert_eq!(trajectories.len(), 1);

        let t = &trajectories[0];
        assert_eq!(t.cum_seconds, vec![0.0, 300.0, 600.0]);
        assert_eq!(t.cum_metres, vec![0.0, 1000.0, 1000.0]);
        assert_eq!(t.path.len(), 3);
        assert_eq!(t.timestamps.len(), 3);
    }

    #[test]
    fn groups_by_vehicle_in_row_order() {
        let rows = vec![
            row(1, "2017-06-10 08:00:00", 0.10, 52.20, 0.0, 0.0),
            row(1, "2017-06-10 08:05:00", 0.11, 52.21, 300.0, 500.0),
            row(2, "2017-06-10 08:02:00", 0.12, 52.22, 0.0, 0.0),
            row(2, "2017-06-10 08:04:00", 0.13, 52.23, 120.0, 800.0),
        ];

        let trajectories = fold_rows(&rows);
        assert_eq!(trajectories.len(), 2);
        assert_eq!(trajectories[0].vehicle_id, 1);
        assert_eq!(trajectories[1].vehicle_id, 2);
        assert_eq!(trajectories[1].cum_seconds, vec![0.0, 120.0]);
        assert_eq!(trajectories[1].cum_metres, vec![0.0, 800.0]);
    }

    #[test]
    fn start_offset_comes_from_first_capture() {
        let rows = vec![
            row(7, "2017-06-10 08:04:30", 0.10, 52.20, 0.0, 0.0),
            row(7, "2017-06-10 08:14:30", 0.11, 52.21, 600.0, 2000.0),
        ];

        let trajectories = fold_rows(&rows);
        assert_eq!(trajectories[0].start_offset, 270);
    }

    #[test]
    fn path_follows_row_order() {
        let rows = vec![
            row(3, "2017-06-10 09:00:00", 0.10, 52.20, 0.0, 0.0),
            row(3, "2017-06-10 09:01:00", 0.20, 52.30, 60.0, 100.0),
            row(3, "2017-06-10 09:02:00", 0.30, 52.40, 60.0, 100.0),
        ];

        let trajectories = fold_rows(&rows);
        assert_eq!(
            trajectories[0].path,
            vec![(0.10, 52.20), (0.20, 52.30), (0.30, 52.40)]
        );
    }

    #[test]
    fn empty_rows_fold_to_nothing() {
        assert!(fold_rows(&[]).is_empty());
    }
}
