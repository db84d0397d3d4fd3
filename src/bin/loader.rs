use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use zurich_tax_api::database::sqlite::{self, SqliteRepository};
use zurich_tax_api::loader::TaxRecordLoader;
use zurich_tax_api::logging::init_logging;
use zurich_tax_api::services::TaxRecordService;

/// Load municipal tax records from a CSV file into the database.
///
/// The CSV file should have the following columns:
/// - Municipality: municipality, "Bezirk ..." district, "Region ..." or canton row
/// - Year: the measurement year
/// - Tax: the tax amount in kCHF (also accepted as IncomeTax or WealthTax)
#[derive(Parser, Debug)]
#[command(name = "tax-records-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing tax records
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL (e.g., sqlite:tax_records.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:tax_records.db?mode=rwc")]
    database: String,

    /// Run database migrations before loading data
    #[arg(short, long, default_value_t = false)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();
    let args = Args::parse();

    let pool = sqlite::connect(&args.database, 1, false)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        info!("Running migrations...");
        sqlite::run_migrations(&pool).await?;
    }

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;
    let records = TaxRecordLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;
    info!("Parsed {} records from {}", records.len(), args.file.display());

    let service = TaxRecordService::new(Box::new(SqliteRepository::new(pool)));
    let summary = TaxRecordLoader::load(&service, &records)
        .await
        .context("Failed to load tax records into database")?;

    for (kind, count) in &summary.inserted_by_kind {
        info!("  {}: {}", kind, count);
    }
    info!(
        "Loaded {} tax records, skipped {} already present.",
        summary.inserted, summary.skipped
    );

    Ok(())
}
