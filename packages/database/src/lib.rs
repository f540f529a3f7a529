#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database connection, queries, and migrations for the ANPR journey map.
//!
//! Uses `switchy_database` for query execution and `switchy_schema` for
//! embedded SQL migrations. Spatial operations (camera point geometry,
//! great-circle distances) use raw SQL with `PostGIS` functions via
//! `query_raw_params()`.

pub mod db;
pub mod queries;

use include_dir::{Dir, include_dir};
use switchy_database::Database;
use switchy_schema::discovery::embedded::EmbeddedMigrationSource;
use switchy_schema::runner::MigrationRunner;

/// Embedded SQL migrations from the `migrations/` directory.
static MIGRATIONS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/../../migrations");

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] switchy_schema::MigrationError),

    /// Data conversion error.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },

    /// The database does not have the `PostGIS` extension installed.
    #[error("database does not have PostGIS installed")]
    PostgisMissing,
}

/// Runs all pending database migrations.
///
/// # Errors
///
/// Returns [`DbError`] if any migration fails to apply.
pub async fn run_migrations(db: &dyn Database) -> Result<(), DbError> {
    let source = EmbeddedMigrationSource::new(&MIGRATIONS_DIR);
    let runner = MigrationRunner::new(Box::new(source));
    runner.run(db).await?;
    log::info!("Database migrations completed successfully");
    Ok(())
}

/// Verifies that the `PostGIS` extension is installed.
///
/// Installing the extension needs admin rights, so it is a precondition
/// rather than something the tool attempts itself. Called before any
/// writes; a missing extension is fatal.
///
/// # Errors
///
/// Returns [`DbError::PostgisMissing`] if the extension is absent.
pub async fn ensure_postgis(db: &dyn Database) -> Result<(), DbError> {
    use moosicbox_json_utils::database::ToValue as _;

    let rows = db
        .query_raw_params("SELECT postgis_full_version() AS version", &[])
        .await
        .map_err(|_| DbError::PostgisMissing)?;

    let version: String = rows
        .first()
        .and_then(|row| row.to_value("version").ok())
        .unwrap_or_default();

    if version.contains("POSTGIS=") {
        log::debug!("PostGIS present: {version}");
        Ok(())
    } else {
        Err(DbError::PostgisMissing)
    }
}

/// Drops and recreates the whole journey schema.
///
/// A full reload is the supported way to re-ingest a survey: capture and
/// vehicle rows are never mutated in place. The data tables are dropped
/// and the embedded migration SQL re-applied directly.
///
/// # Errors
///
/// Returns [`DbError`] if any drop or create statement fails.
pub async fn reset(db: &dyn Database) -> Result<(), DbError> {
    db.exec_raw("DROP TABLE IF EXISTS captures CASCADE").await?;
    db.exec_raw("DROP TABLE IF EXISTS vehicles CASCADE").await?;
    db.exec_raw("DROP TABLE IF EXISTS cameras CASCADE").await?;
    log::info!("Dropped journey tables");

    let mut dirs: Vec<_> = MIGRATIONS_DIR.dirs().collect();
    dirs.sort_by(|a, b| a.path().cmp(b.path()));

    for dir in dirs {
        let up_path = dir.path().join("up.sql");
        let Some(sql) = dir.get_file(&up_path).and_then(include_dir::File::contents_utf8) else {
            continue;
        };
        db.exec_raw(sql).await?;
    }

    log::info!("Recreated journey schema");
    Ok(())
}
