use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the roster bot.
#[derive(Error, Debug)]
pub enum RosterError {
    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The spreadsheet identifier does not match the accepted shape.
    #[error("\"{0}\" is not a valid spreadsheet id")]
    InvalidSheetId(String),

    /// A username contains characters outside the accepted alphabet.
    #[error("\"{0}\" is not a valid username")]
    InvalidUsername(String),

    /// The configured output directory does not exist.
    #[error("Output directory not found: {0}")]
    OutputPathNotFound(PathBuf),

    /// A spreadsheet row did not follow the positional field convention.
    #[error("Malformed record ({reason}): \"{content}\"")]
    MalformedRecord {
        content: String,
        reason: &'static str,
    },

    /// The spreadsheet feed could not be fetched (transport or HTTP failure).
    #[error("Spreadsheet source unavailable: {0}")]
    SourceUnavailable(String),

    /// The spreadsheet feed payload was missing an expected key.
    #[error("Spreadsheet feed malformed: {0}")]
    SourceMalformed(String),

    /// A profile lookup failed (network, non-2xx status, or bad payload).
    #[error("Profile fetch failed for \"{username}\": {reason}")]
    ProfileFetch { username: String, reason: String },

    /// A JSON document could not be parsed or serialized.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the roster crates.
pub type Result<T> = std::result::Result<T, RosterError>;
