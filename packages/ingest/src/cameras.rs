//! Camera reference-geometry import.
//!
//! The cameras' locations are not in the survey spreadsheets — they are
//! maintained as a separate set of map markers and exported as a `GeoJSON`
//! `FeatureCollection` of Points with `name` and `description` properties.
//! This loader runs once at setup time and is idempotent.

use std::path::Path;

use anpr_map_database::{DbError, queries};
use anpr_map_database_models::CameraRecord;
use geojson::{GeoJson, Value};
use switchy_database::Database;

/// Errors importing camera geometry.
#[derive(Debug, thiserror::Error)]
pub enum CameraImportError {
    /// Filesystem error reading the geometry file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    Geojson(#[from] geojson::Error),

    /// The file is valid `GeoJSON` but not a `FeatureCollection`.
    #[error("geometry file is not a FeatureCollection")]
    NotAFeatureCollection,

    /// A feature's geometry is missing or not a Point.
    #[error("feature {index} is not a Point")]
    NotAPoint {
        /// 0-based feature index in the collection.
        index: usize,
    },

    /// A feature has no `name` property to use as the camera id.
    #[error("feature {index} has no name property")]
    MissingName {
        /// 0-based feature index in the collection.
        index: usize,
    },

    /// Database failure.
    #[error(transparent)]
    Database(#[from] DbError),
}

/// Imports every camera marker from `path` into the `cameras` table.
/// Returns the number of cameras imported.
///
/// # Errors
///
/// Returns [`CameraImportError`] if the file cannot be read or parsed,
/// a feature is malformed, or a database write fails. Runs before any
/// trip data exists, so a failure leaves nothing half-loaded that a
/// re-run would not fix.
pub async fn import_cameras(db: &dyn Database, path: &Path) -> Result<u64, CameraImportError> {
    let text = std::fs::read_to_string(path)?;
    let geojson: GeoJson = text.parse()?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(CameraImportError::NotAFeatureCollection);
    };

    let mut imported = 0u64;

    for (index, feature) in collection.features.iter().enumerate() {
        let Some(Value::Point(coords)) = feature.geometry.as_ref().map(|g| &g.value) else {
            return Err(CameraImportError::NotAPoint { index });
        };
        let (Some(&longitude), Some(&latitude)) = (coords.first(), coords.get(1)) else {
            return Err(CameraImportError::NotAPoint { index });
        };

        let properties = feature.properties.as_ref();
        let id = properties
            .and_then(|p| p.get("name"))
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(CameraImportError::MissingName { index })?;
        let description = properties
            .and_then(|p| p.get("description"))
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);

        let camera = CameraRecord {
            id: id.to_string(),
            description,
            longitude,
            latitude,
        };
        queries::upsert_camera(db, &camera).await?;
        imported += 1;
    }

    log::info!("imported {imported} cameras from {}", path.display());
    Ok(imported)
}
