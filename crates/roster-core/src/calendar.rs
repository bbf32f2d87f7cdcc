//! Week-of-month arithmetic and timezone resolution.

use chrono::{Datelike, NaiveDate, Weekday};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{Result, RosterError};

// ── Week of month ─────────────────────────────────────────────────────────────

/// Which week of its month `date` falls in, given the weekday a new week
/// rolls over on.
///
/// Starts at week 1 and increments for every day of the month, from the 1st
/// through `date` itself, whose weekday equals `rollover`. A target date that
/// lands on the rollover weekday therefore already counts as the new week:
/// with a Sunday rollover, `2024-03-01` (Friday) is week 1 and `2024-03-03`
/// (Sunday) is week 2.
///
/// Month lengths and leap years are chrono's problem, not ours.
pub fn week_of_month(date: NaiveDate, rollover: Weekday) -> u32 {
    let mut weeks = 1;
    for day in 1..=date.day() {
        // `day` never exceeds the month length, so `with_day` cannot fail.
        if let Some(d) = date.with_day(day) {
            if d.weekday() == rollover {
                weeks += 1;
            }
        }
    }
    weeks
}

/// Parse a rollover weekday name (e.g. `"sunday"`, `"Mon"`).
pub fn parse_rollover(name: &str) -> Result<Weekday> {
    name.parse::<Weekday>()
        .map_err(|_| RosterError::Config(format!("\"{}\" is not a weekday name", name)))
}

// ── Timezone resolution ───────────────────────────────────────────────────────

/// Resolve a configured timezone name to a [`Tz`].
///
/// `"auto"` detects the system IANA zone; an unrecognised name logs a warning
/// and falls back to UTC.
pub fn resolve_timezone(name: &str) -> Tz {
    let tz_name = if name.eq_ignore_ascii_case("auto") {
        iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
    } else {
        name.to_string()
    };

    tz_name.parse::<Tz>().unwrap_or_else(|_| {
        warn!(
            "unrecognised timezone \"{}\", falling back to UTC",
            tz_name
        );
        Tz::UTC
    })
}
