//! Spreadsheet feed client.
//!
//! Fetches the public list feed of the inventory spreadsheet and reduces it
//! to a [`SheetFeed`]: the feed's last-updated timestamp plus the raw cell
//! text of every row. Row parsing happens downstream in
//! `roster_core::parser`.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use roster_core::error::{Result, RosterError};
use roster_core::models::SheetFeed;
use roster_core::settings::SheetConfig;

const FEED_BASE_URL: &str = "https://spreadsheets.google.com/feeds/list";
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// ── SpreadsheetSource ─────────────────────────────────────────────────────────

/// Anything that can produce the raw account-inventory rows for one run.
#[async_trait]
pub trait SpreadsheetSource: Send + Sync {
    /// Fetch the feed once.
    ///
    /// Fails with [`RosterError::SourceUnavailable`] on transport or HTTP
    /// errors and [`RosterError::SourceMalformed`] when the payload is
    /// missing the expected keys. Both are fatal to the run.
    async fn fetch_feed(&self) -> Result<SheetFeed>;
}

// ── GoogleSheetsClient ────────────────────────────────────────────────────────

/// Client for the public Google Sheets list feed.
pub struct GoogleSheetsClient {
    config: SheetConfig,
    http: reqwest::Client,
}

impl GoogleSheetsClient {
    /// Build a client; the sheet id was already shape-checked by
    /// [`SheetConfig::new`], so this only constructs the HTTP client.
    pub fn new(config: SheetConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| RosterError::SourceUnavailable(e.to_string()))?;
        Ok(Self { config, http })
    }

    fn feed_url(&self) -> String {
        format!(
            "{}/{}/od6/public/basic?alt=json",
            FEED_BASE_URL, self.config.sheet_id
        )
    }
}

#[async_trait]
impl SpreadsheetSource for GoogleSheetsClient {
    async fn fetch_feed(&self) -> Result<SheetFeed> {
        let url = self.feed_url();
        debug!(url = %url, "fetching spreadsheet feed");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| RosterError::SourceUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RosterError::SourceUnavailable(format!(
                "feed returned HTTP {}",
                status.as_u16()
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| RosterError::SourceMalformed(e.to_string()))?;

        parse_feed(&payload)
    }
}

// ── Feed payload parsing ──────────────────────────────────────────────────────

/// Reduce the raw feed document to its updated-at stamp and row texts.
///
/// Feed shape: `feed.updated.$t` holds the timestamp, each `feed.entry[]`
/// holds one row's cell text under `content.$t`.
pub fn parse_feed(payload: &Value) -> Result<SheetFeed> {
    let feed = payload
        .get("feed")
        .ok_or_else(|| RosterError::SourceMalformed("missing \"feed\"".to_string()))?;

    let updated_at = feed
        .pointer("/updated/$t")
        .and_then(Value::as_str)
        .ok_or_else(|| RosterError::SourceMalformed("missing \"feed.updated.$t\"".to_string()))?
        .to_string();

    let entries = feed
        .get("entry")
        .and_then(Value::as_array)
        .ok_or_else(|| RosterError::SourceMalformed("missing \"feed.entry\"".to_string()))?;

    let mut rows = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let content = entry
            .pointer("/content/$t")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                RosterError::SourceMalformed(format!(
                    "entry {} is missing \"content.$t\"",
                    index
                ))
            })?;
        rows.push(content.to_string());
    }

    Ok(SheetFeed { updated_at, rows })
}
