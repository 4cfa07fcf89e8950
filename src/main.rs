// ============================================================
// ADDRESS MAPPER CLI
// ============================================================
// Enrich an uploaded spreadsheet from the persisted lookup
// tables and write the processed result back out as CSV

use address_mapper::application::use_cases::enrichment::EnrichmentUseCase;
use address_mapper::application::use_cases::exclusion_filter::ExclusionFilterUseCase;
use address_mapper::application::use_cases::processing::ProcessingUseCase;
use address_mapper::domain::error::{AppError, Result};
use address_mapper::infrastructure::config::PersistenceConfig;
use address_mapper::infrastructure::persistence::StoreSet;
use address_mapper::infrastructure::spreadsheet::{csv_codec::CsvCodec, xlsx};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    if let Err(e) = run().await {
        error!(error = %e, "processing failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let input = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            return Err(AppError::ValidationError(
                "Usage: address-mapper <input.csv|input.xlsx> [output.csv]".to_string(),
            ))
        }
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output(&input));

    let mut dataset = read_input(&input)?;
    info!(input = %input.display(), rows = dataset.row_count(), "file loaded");

    let stores = StoreSet::from_config(&PersistenceConfig::from_env())?;
    let pipeline = ProcessingUseCase::new(
        EnrichmentUseCase::new(stores.addresses.clone(), stores.customer_companies.clone()),
        ExclusionFilterUseCase::new(stores.exclusions.clone()),
    );

    let report = pipeline.process(&mut dataset).await?;

    info!(
        address_column = %report.address_column,
        matched = report.matched,
        unmatched = report.unmatched,
        removed = report.removed_rows,
        surviving = report.surviving_rows,
        "pipeline finished"
    );
    if let Some(write) = &report.customer_company_write {
        if let Some(warning) = &write.warning {
            warn!(warning = %warning, "customer-company table not saved durably");
        }
    }

    CsvCodec::new().write_file(&dataset, &output)?;
    info!(output = %output.display(), rows = dataset.row_count(), "processed file written");
    Ok(())
}

fn read_input(path: &Path) -> Result<address_mapper::domain::dataset::TabularDataset> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("xlsx") => xlsx::read_file(path),
        _ => CsvCodec::read_file_auto_detect(path),
    }
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{}_processed.csv", stem))
}
