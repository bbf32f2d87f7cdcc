mod bootstrap;

use anyhow::Result;
use clap::Parser;

use roster_core::calendar::{parse_rollover, resolve_timezone};
use roster_core::settings::{Settings, SheetConfig};
use roster_data::enricher::Enricher;
use roster_data::profile::RapidApiProfileClient;
use roster_data::sheet::GoogleSheetsClient;
use roster_runtime::pipeline::SnapshotPipeline;
use roster_runtime::sink::SnapshotSink;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("roster-bot v{} starting", env!("CARGO_PKG_VERSION"));

    // All validation happens here, before any network I/O.
    let rollover = parse_rollover(&settings.rollover)?;
    let timezone = resolve_timezone(&settings.timezone);
    let sheet_config = SheetConfig::new(settings.sheet_id.clone())?;

    let output_dir = settings
        .output_dir
        .clone()
        .unwrap_or_else(bootstrap::default_output_dir);
    let sink = SnapshotSink::new(output_dir)?;

    let sheet = GoogleSheetsClient::new(sheet_config)?;
    let mut pipeline = SnapshotPipeline::new(sheet, sink, rollover, timezone);

    if let Some(profile_config) = settings.profile_config()? {
        tracing::info!("profile enrichment enabled for Instagram accounts");
        let mut enricher = Enricher::new();
        enricher.register(
            "Instagram",
            Box::new(RapidApiProfileClient::new(profile_config)?),
        );
        pipeline = pipeline.with_enricher(enricher);
    }

    let report = pipeline.run().await?;

    tracing::info!(
        "run complete: {} rows ({} parsed, {} skipped), snapshot at {}",
        report.rows,
        report.parsed,
        report.skipped,
        report.path.display()
    );
    if let Some(enrich) = &report.enrich {
        tracing::info!(
            "enrichment: {} attempted, {} enriched, {} failed, {} skipped",
            enrich.attempted,
            enrich.enriched,
            enrich.failed,
            enrich.skipped
        );
    }

    Ok(())
}
