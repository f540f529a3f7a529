//! HTTP handler functions for the ANPR journey map API.

use actix_web::{HttpResponse, web};
use anpr_map_database::queries;
use anpr_map_server_models::{ApiCamera, ApiHealth};
use anpr_map_trajectory::features::to_feature_collection;
use anpr_map_trajectory_models::TrajectoryWindow;
use chrono::NaiveDate;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/cameras`
///
/// Returns the camera reference data with point coordinates.
pub async fn cameras(state: web::Data<AppState>) -> HttpResponse {
    match queries::list_cameras(state.db.as_ref()).await {
        Ok(rows) => {
            let cameras: Vec<ApiCamera> = rows.into_iter().map(ApiCamera::from).collect();
            HttpResponse::Ok().json(cameras)
        }
        Err(e) => {
            log::error!("Failed to query cameras: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to query cameras"
            }))
        }
    }
}

/// `GET /api/by-hour/{day}/{hour}/data.geojson`
///
/// Returns the trajectory `FeatureCollection` for the given hour window.
/// `day` is `YYYY-MM-DD`; `hour` is 0–23.
pub async fn trajectories_by_hour(
    state: web::Data<AppState>,
    path: web::Path<(String, u32)>,
) -> HttpResponse {
    let (day_str, hour) = path.into_inner();

    let Some(window) = parse_window(&day_str, hour) else {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "expected /api/by-hour/YYYY-MM-DD/0-23/data.geojson"
        }));
    };

    match anpr_map_trajectory::trajectories(state.db.as_ref(), window).await {
        Ok(trajectories) => HttpResponse::Ok().json(to_feature_collection(&trajectories)),
        Err(e) => {
            log::error!("Failed to query trajectories: {e}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Failed to query trajectories"
            }))
        }
    }
}

/// Parses the day + hour path segments into a [`TrajectoryWindow`].
fn parse_window(day: &str, hour: u32) -> Option<TrajectoryWindow> {
    let day = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
    TrajectoryWindow::new(day, hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_window() {
        let window = parse_window("2017-06-10", 8).unwrap();
        assert_eq!(
            window.start_bound(),
            NaiveDate::from_ymd_opt(2017, 6, 10)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn rejects_bad_day_or_hour() {
        assert!(parse_window("day0", 0).is_none());
        assert!(parse_window("2017-13-01", 0).is_none());
        assert!(parse_window("2017-06-10", 24).is_none());
    }
}
