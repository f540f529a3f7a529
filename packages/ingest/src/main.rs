#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the ANPR survey ingestion tool.

use std::path::PathBuf;
use std::time::Instant;

use anpr_map_database::{db, ensure_postgis, queries, reset, run_migrations};
use anpr_map_ingest::{cameras, ingest_workbook};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "anpr_map_ingest", about = "ANPR journey spreadsheet ingestion tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Drop and recreate the journey schema (full reload)
    Reset,
    /// Import camera reference geometry from a GeoJSON file
    Cameras {
        /// Path to the camera marker export (GeoJSON `FeatureCollection` of Points)
        geometry: PathBuf,
    },
    /// Load survey worksheets (sheet-per-file CSV exports) from a directory
    Load {
        /// Directory containing one `<camera>.csv` per worksheet
        sheets_dir: PathBuf,
        /// Drop and recreate the schema before loading
        #[arg(long)]
        reset: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => {
            let db = db::connect_from_env().await?;
            ensure_postgis(db.as_ref()).await?;
            log::info!("Running database migrations...");
            run_migrations(db.as_ref()).await?;
            log::info!("Migrations complete.");
        }
        Commands::Reset => {
            let db = db::connect_from_env().await?;
            ensure_postgis(db.as_ref()).await?;
            reset(db.as_ref()).await?;
            log::info!("Schema reset complete.");
        }
        Commands::Cameras { geometry } => {
            let db = db::connect_from_env().await?;
            ensure_postgis(db.as_ref()).await?;
            run_migrations(db.as_ref()).await?;

            let count = cameras::import_cameras(db.as_ref(), &geometry).await?;
            log::info!("Camera import complete: {count} cameras.");
        }
        Commands::Load {
            sheets_dir,
            reset: do_reset,
        } => {
            let db = db::connect_from_env().await?;
            ensure_postgis(db.as_ref()).await?;
            if do_reset {
                reset(db.as_ref()).await?;
            }
            run_migrations(db.as_ref()).await?;

            log::info!("loading workbook from {}...", sheets_dir.display());
            let workbook = anpr_map_workbook::csv_dir::load_dir(&sheets_dir)?;

            let start = Instant::now();
            let rows = ingest_workbook(db.as_ref(), &workbook).await;

            let vehicles = queries::count_vehicles(db.as_ref()).await?;
            let captures = queries::count_captures(db.as_ref()).await?;
            let elapsed = start.elapsed();
            log::info!(
                "Load complete: {rows} rows this run; {vehicles} vehicles / {captures} captures total, took {:.1}s",
                elapsed.as_secs_f64()
            );
        }
    }

    Ok(())
}
