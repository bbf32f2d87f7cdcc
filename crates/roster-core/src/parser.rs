//! Positional field parsing for raw spreadsheet rows.
//!
//! A row's cell text is expected to look like
//! `"Platform: Instagram, Username: @someone, Administrator: Ana, Status: Activa"`.
//! Splitting is positional (field order is fixed), not label-matched, so the
//! whole convention is isolated here: replacing the sheet with a
//! structured-columns source only touches this module.

use crate::error::{Result, RosterError};
use crate::models::{AccountStatus, Record};

/// Number of positional fields a row must carry (platform, username,
/// administrator, status). Trailing extra segments are ignored.
const FIELD_COUNT: usize = 4;

/// Parse one raw row into a [`Record`].
///
/// Fails with [`RosterError::MalformedRecord`] when fewer than four
/// comma-separated segments exist, when a segment has no `": "` separator, or
/// when a value is empty — never with a panic or a partially-filled record.
pub fn parse_record(content: &str) -> Result<Record> {
    let segments: Vec<&str> = content.split(", ").collect();
    if segments.len() < FIELD_COUNT {
        return Err(RosterError::MalformedRecord {
            content: content.to_string(),
            reason: "expected 4 comma-separated fields",
        });
    }

    let platform = field_value(segments[0], content)?;
    let username = field_value(segments[1], content)?;
    let administrator = field_value(segments[2], content)?;
    let status = field_value(segments[3], content)?;

    Ok(Record {
        content: content.to_string(),
        platform: capitalize(platform),
        username: username.to_string(),
        administrator: administrator.to_string(),
        status: AccountStatus::from_label(status),
    })
}

/// Extract the value half of a `"Label: value"` segment.
fn field_value<'a>(segment: &'a str, content: &str) -> Result<&'a str> {
    let (_, value) = segment
        .split_once(": ")
        .ok_or_else(|| RosterError::MalformedRecord {
            content: content.to_string(),
            reason: "field is missing its \": \" separator",
        })?;

    let value = value.trim();
    if value.is_empty() {
        return Err(RosterError::MalformedRecord {
            content: content.to_string(),
            reason: "field has an empty value",
        });
    }
    Ok(value)
}

/// Uppercase the first character, leaving the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
