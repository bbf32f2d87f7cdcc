//! One batch run, start to finish.
//!
//! Fetch the feed, parse the rows, aggregate along both dimensions, run the
//! optional enrichment pass, assemble the snapshot, write it. Feed failures
//! abort the run before anything touches disk; malformed rows are skipped
//! with a warning because the sheet is human-edited and one bad row must not
//! corrupt the whole export.

use std::path::PathBuf;

use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use tracing::{info, warn};

use roster_core::aggregate::{
    list_administrators, list_platforms, summarize_by_administrator, summarize_by_platform,
};
use roster_core::error::Result;
use roster_core::models::{AdminSummary, PlatformSummary, Record};
use roster_core::parser::parse_record;
use roster_core::snapshot::build_snapshot;
use roster_data::enricher::{EnrichReport, Enricher};
use roster_data::sheet::SpreadsheetSource;

use crate::sink::SnapshotSink;

// ── RunReport ─────────────────────────────────────────────────────────────────

/// Outcome of one pipeline run.
#[derive(Debug)]
pub struct RunReport {
    /// Rows delivered by the feed.
    pub rows: usize,
    /// Rows that parsed into records.
    pub parsed: usize,
    /// Rows skipped as malformed.
    pub skipped: usize,
    /// Enrichment outcome, when an enricher was configured.
    pub enrich: Option<EnrichReport>,
    /// Where the snapshot was written.
    pub path: PathBuf,
}

// ── SnapshotPipeline ──────────────────────────────────────────────────────────

/// Owns the collaborators for one run and sequences them.
pub struct SnapshotPipeline<S: SpreadsheetSource> {
    sheet: S,
    sink: SnapshotSink,
    enricher: Option<Enricher>,
    rollover: Weekday,
    timezone: Tz,
}

impl<S: SpreadsheetSource> SnapshotPipeline<S> {
    pub fn new(sheet: S, sink: SnapshotSink, rollover: Weekday, timezone: Tz) -> Self {
        Self {
            sheet,
            sink,
            enricher: None,
            rollover,
            timezone,
        }
    }

    /// Attach the profile enrichment pass.
    pub fn with_enricher(mut self, enricher: Enricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    /// Run once, stamping the snapshot with the current wall-clock time.
    pub async fn run(&self) -> Result<RunReport> {
        self.run_at(Utc::now().with_timezone(&self.timezone)).await
    }

    /// Run once with an explicit generation time (injectable for tests).
    pub async fn run_at(&self, now: DateTime<Tz>) -> Result<RunReport> {
        let feed = self.sheet.fetch_feed().await?;
        info!(rows = feed.rows.len(), "feed fetched");

        let (records, skipped) = parse_rows(&feed.rows);

        let platforms = list_platforms(&records);
        let mut accounts: Vec<PlatformSummary> = platforms
            .iter()
            .map(|p| summarize_by_platform(&records, p))
            .collect();
        let administrators: Vec<AdminSummary> = list_administrators(&records)
            .iter()
            .map(|a| summarize_by_administrator(&records, a))
            .collect();

        let enrich = match &self.enricher {
            Some(enricher) => Some(enricher.enrich(&mut accounts).await),
            None => None,
        };

        let snapshot = build_snapshot(
            &feed.updated_at,
            platforms,
            accounts,
            administrators,
            now,
            self.rollover,
        );
        let path = self.sink.write(&snapshot, now.date_naive())?;

        Ok(RunReport {
            rows: feed.rows.len(),
            parsed: records.len(),
            skipped,
            enrich,
            path,
        })
    }
}

/// Parse every row, skipping the malformed ones with a warning.
fn parse_rows(rows: &[String]) -> (Vec<Record>, usize) {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for row in rows {
        match parse_record(row) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!("skipping malformed row: {}", err);
                skipped += 1;
            }
        }
    }
    (records, skipped)
}
