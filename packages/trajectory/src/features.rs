//! `GeoJSON` assembly for trajectory output.
//!
//! Property names (`start_offset`, `trip_cum_seconds`, `trip_cum_metres`)
//! are what the map front-end animates on.

use anpr_map_trajectory_models::VehicleTrajectory;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

/// Builds one `LineString` feature per trajectory.
#[must_use]
pub fn to_feature_collection(trajectories: &[VehicleTrajectory]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: trajectories.iter().map(to_feature).collect(),
        foreign_members: None,
    }
}

fn to_feature(trajectory: &VehicleTrajectory) -> Feature {
    let line: Vec<Vec<f64>> = trajectory
        .path
        .iter()
        .map(|&(lng, lat)| vec![lng, lat])
        .collect();

    let timestamps: Vec<String> = trajectory
        .timestamps
        .iter()
        .map(|ts| ts.format("%Y-%m-%dT%H:%M:%S").to_string())
        .collect();

    let mut properties = JsonObject::new();
    properties.insert(
        "vehicle_id".to_string(),
        serde_json::json!(trajectory.vehicle_id),
    );
    properties.insert(
        "vehicle_class".to_string(),
        serde_json::json!(trajectory.vehicle_class.to_string()),
    );
    properties.insert(
        "start_offset".to_string(),
        serde_json::json!(trajectory.start_offset),
    );
    properties.insert("timestamps".to_string(), serde_json::json!(timestamps));
    properties.insert(
        "trip_cum_seconds".to_string(),
        serde_json::json!(trajectory.cum_seconds),
    );
    properties.insert(
        "trip_cum_metres".to_string(),
        serde_json::json!(trajectory.cum_metres),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(line))),
        id: Some(geojson::feature::Id::Number(trajectory.vehicle_id.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use anpr_map_anpr_models::VehicleClass;
    use chrono::NaiveDate;

    use super::*;

    fn sample() -> VehicleTrajectory {
        let day = NaiveDate::from_ymd_opt(2017, 6, 10).unwrap();
        VehicleTrajectory {
            vehicle_id: 42,
            vehicle_class: VehicleClass::Lgv,
            path: vec![(0.10, 52.20), (0.11, 52.21)],
            timestamps: vec![
                day.and_hms_opt(8, 4, 30).unwrap(),
                day.and_hms_opt(8, 14, 30).unwrap(),
            ],
            cum_seconds: vec![0.0, 600.0],
            cum_metres: vec![0.0, 1234.5],
            start_offset: 270,
        }
    }

    #[test]
    fn builds_line_string_with_animation_properties() {
        let collection = to_feature_collection(&[sample()]);
        assert_eq!(collection.features.len(), 1);

        let feature = &collection.features[0];
        let Some(Geometry {
            value: Value::LineString(line),
            ..
        }) = feature.geometry.as_ref()
        else {
            panic!("expected a LineString geometry");
        };
        assert_eq!(line.len(), 2);
        assert_eq!(line[0], vec![0.10, 52.20]);

        let properties = feature.properties.as_ref().unwrap();
        assert_eq!(properties["vehicle_class"], "LGV<3.5T");
        assert_eq!(properties["start_offset"], 270);
        assert_eq!(
            properties["trip_cum_seconds"],
            serde_json::json!([0.0, 600.0])
        );
        assert_eq!(
            properties["trip_cum_metres"],
            serde_json::json!([0.0, 1234.5])
        );
        assert_eq!(
            properties["timestamps"],
            serde_json::json!(["2017-06-10T08:04:30", "2017-06-10T08:14:30"])
        );
    }

    #[test]
    fn empty_input_yields_empty_collection() {
        let collection = to_feature_collection(&[]);
        assert!(collection.features.is_empty());
    }
}
