#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Per-vehicle journey reconstruction from capture rows.
//!
//! The pipeline has three fixed stages applied in sequence:
//!
//! 1. [`queries::capture_deltas`] — one SQL pass that selects every
//!    capture of every vehicle whose first capture precedes the window's
//!    end bound, and computes per-capture time/distance deltas with `LAG`
//!    and `ST_Distance` over a single `PARTITION BY vehicle ORDER BY ts,
//!    id` window.
//! 2. [`fold::fold_rows`] — a pure fold of the ordered row stream into
//!    per-vehicle prefix sums, parallel timestamp arrays, and path
//!    coordinates.
//! 3. [`features::to_feature_collection`] — `GeoJSON` assembly for the map
//!    front-end.
//!
//! The engine is read-only and stateless; invocations are independent and
//! may run concurrently with each other and with ingestion.

pub mod features;
pub mod fold;
pub mod queries;

pub use queries::trajectories;

/// Errors from the trajectory query pipeline.
#[derive(Debug, thiserror::Error)]
pub enum TrajectoryError {
    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// Row data that failed to convert into the expected shape.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
