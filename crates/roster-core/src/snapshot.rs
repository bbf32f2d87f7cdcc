//! Snapshot assembly.
//!
//! Pure structural merge of the aggregation (and optional enrichment) output
//! with the generation timestamp and week-of-month stamp. Inputs are assumed
//! well-formed; no validation happens here.

use chrono::{DateTime, Weekday};
use chrono_tz::Tz;

use crate::calendar::week_of_month;
use crate::models::{AdminSummary, PlatformSummary, Snapshot, SCHEMA_VERSION};

/// Assemble the final [`Snapshot`] for one run.
///
/// `generated_at` is rendered as 12-hour wall-clock time with an AM/PM
/// marker; `week_of_month` is derived from `now`'s calendar date.
pub fn build_snapshot(
    updated_at: &str,
    platforms: Vec<String>,
    accounts: Vec<PlatformSummary>,
    administrators: Vec<AdminSummary>,
    now: DateTime<Tz>,
    rollover: Weekday,
) -> Snapshot {
    Snapshot {
        schema_version: SCHEMA_VERSION,
        updated_at: updated_at.to_string(),
        platforms,
        accounts,
        administrators,
        generated_at: now.format("%I:%M:%S %p").to_string(),
        week_of_month: week_of_month(now.date_naive(), rollover),
    }
}
