#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the ANPR journey map server.
//!
//! Trajectory responses are `GeoJSON` and serialized straight from the
//! `geojson` crate's types; the shapes here cover everything else.

use anpr_map_database_models::CameraRecord;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// A camera as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCamera {
    /// Camera identifier.
    pub id: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Latitude (WGS84).
    pub latitude: f64,
}

impl From<CameraRecord> for ApiCamera {
    fn from(record: CameraRecord) -> Self {
        Self {
            id: record.id,
            description: record.description,
            longitude: record.longitude,
            latitude: record.latitude,
        }
    }
}
