//! Database query functions for the journey schema.
//!
//! Camera geometry uses raw SQL with `PostGIS` functions; everything else
//! is plain parameterized SQL through `switchy_database`.

use std::fmt::Write as _;

use anpr_map_anpr_models::VehicleClass;
use anpr_map_database_models::{CameraRecord, NewCapture};
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};

use crate::DbError;

/// Maximum number of parameters `PostgreSQL` allows per statement.
pub const PG_MAX_PARAMS: usize = 65_535;

/// Inserts or updates a camera reference-data row.
///
/// Re-importing the geometry file is idempotent: an existing camera gets
/// its description and location refreshed.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn upsert_camera(db: &dyn Database, camera: &CameraRecord) -> Result<(), DbError> {
    db.exec_raw_params(
        "INSERT INTO cameras (id, description, location)
         VALUES ($1, $2, ST_SetSRID(ST_MakePoint($3, $4), 4326)::geography)
         ON CONFLICT (id) DO UPDATE SET
             description = EXCLUDED.description,
             location = EXCLUDED.location",
        &[
            DatabaseValue::String(camera.id.clone()),
            camera
                .description
                .as_ref()
                .map_or(DatabaseValue::Null, |d| DatabaseValue::String(d.clone())),
            DatabaseValue::Real64(camera.longitude),
            DatabaseValue::Real64(camera.latitude),
        ],
    )
    .await?;

    Ok(())
}

/// Returns all cameras with their point coordinates, ordered by id.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn list_cameras(db: &dyn Database) -> Result<Vec<CameraRecord>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT id, description,
                    ST_X(location::geometry) AS longitude,
                    ST_Y(location::geometry) AS latitude
             FROM cameras
             ORDER BY id",
            &[],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| CameraRecord {
            id: row.to_value("id").unwrap_or_default(),
            description: row.to_value("description").unwrap_or(None),
            longitude: row.to_value("longitude").unwrap_or(0.0),
            latitude: row.to_value("latitude").unwrap_or(0.0),
        })
        .collect())
}

/// Inserts one vehicle row and returns its generated identity.
///
/// Must be called (and its id obtained) before any capture rows that
/// reference the vehicle are inserted.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails or no id comes
/// back.
pub async fn insert_vehicle(db: &dyn Database, class: VehicleClass) -> Result<i32, DbError> {
    let rows = db
        .query_raw_params(
            "INSERT INTO vehicles (class) VALUES ($1) RETURNING id",
            &[DatabaseValue::String(class.to_string())],
        )
        .await?;

    let row = rows.first().ok_or_else(|| DbError::Conversion {
        message: "Failed to get vehicle id from insert".to_string(),
    })?;

    let id: i32 = row.to_value("id").map_err(|e| DbError::Conversion {
        message: format!("Failed to parse vehicle id: {e}"),
    })?;

    Ok(id)
}

/// Inserts a batch of capture rows for one vehicle.
///
/// Uses a multi-row `VALUES` statement, chunked to stay under the
/// parameter limit. Returns the number of rows inserted.
///
/// # Errors
///
/// Returns [`DbError`] if any insert fails — including a foreign-key
/// violation for a camera the chain names but the geometry import never
/// loaded.
pub async fn insert_captures(
    db: &dyn Database,
    vehicle_id: i32,
    captures: &[NewCapture],
) -> Result<u64, DbError> {
    if captures.is_empty() {
        return Ok(0);
    }

    let mut inserted = 0u64;

    // 4 params per row: camera_id, vehicle_id, direction, ts
    let params_per_row: usize = 4;
    let chunk_size = PG_MAX_PARAMS / params_per_row;

    for chunk in captures.chunks(chunk_size) {
        let mut sql =
            String::from("INSERT INTO captures (camera_id, vehicle_id, direction, ts) VALUES ");
        let mut params: Vec<DatabaseValue> = Vec::with_capacity(chunk.len() * params_per_row);
        let mut idx = 1u32;

        for (i, capture) in chunk.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            write!(
                sql,
                "(${idx}, ${v}, ${d}, ${t})",
                v = idx + 1,
                d = idx + 2,
                t = idx + 3,
            )
            .unwrap();
            params.push(DatabaseValue::String(capture.camera_id.clone()));
            params.push(DatabaseValue::Int32(vehicle_id));
            params.push(DatabaseValue::String(capture.direction.to_string()));
            params.push(DatabaseValue::DateTime(capture.ts));
            idx += 4;
        }

        inserted += db.exec_raw_params(&sql, &params).await?;
    }

    Ok(inserted)
}

/// Returns the total number of vehicle rows.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn count_vehicles(db: &dyn Database) -> Result<u64, DbError> {
    count_table(db, "SELECT COUNT(*) AS count FROM vehicles").await
}

/// Returns the total number of capture rows.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn count_captures(db: &dyn Database) -> Result<u64, DbError> {
    count_table(db, "SELECT COUNT(*) AS count FROM captures").await
}

async fn count_table(db: &dyn Database, sql: &str) -> Result<u64, DbError> {
    let rows = db.query_raw_params(sql, &[]).await?;
    let count: i64 = rows.first().map_or(0, |r| r.to_value("count").unwrap_or(0));

    #[allow(clippy::cast_sign_loss)]
    Ok(count as u64)
}
