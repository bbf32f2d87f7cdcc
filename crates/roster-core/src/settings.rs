use clap::Parser;
use regex::Regex;
use std::path::PathBuf;

use crate::error::{Result, RosterError};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Account-inventory snapshot bot
#[derive(Parser, Debug, Clone)]
#[command(
    name = "roster-bot",
    about = "Pulls the account inventory from a spreadsheet and writes a dated JSON snapshot",
    version
)]
pub struct Settings {
    /// Spreadsheet identifier of the account inventory
    #[arg(long, env = "ROSTER_SHEET_ID")]
    pub sheet_id: String,

    /// Directory snapshots are written to (default: ~/.roster-bot/data)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Enrich active accounts with profile statistics
    #[arg(long)]
    pub enrich: bool,

    /// Host of the profile-lookup API
    #[arg(long, env = "ROSTER_PROFILE_API_HOST")]
    pub profile_host: Option<String>,

    /// API key for the profile-lookup API
    #[arg(long, env = "ROSTER_PROFILE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Weekday a new week-of-month begins on
    #[arg(long, default_value = "sunday")]
    pub rollover: String,

    /// IANA timezone for the generation timestamp (auto-detected if not specified)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,
}

impl Settings {
    /// Profile-API configuration, present only when enrichment is requested.
    ///
    /// Fails fast when `--enrich` is set but the host or key is missing, so
    /// the run dies before any network I/O.
    pub fn profile_config(&self) -> Result<Option<ProfileApiConfig>> {
        if !self.enrich {
            return Ok(None);
        }
        match (self.profile_host.as_deref(), self.api_key.as_deref()) {
            (Some(host), Some(key)) if !host.is_empty() && !key.is_empty() => {
                Ok(Some(ProfileApiConfig {
                    host: host.to_string(),
                    api_key: key.to_string(),
                }))
            }
            _ => Err(RosterError::Config(
                "--enrich requires both --profile-host and --api-key".to_string(),
            )),
        }
    }
}

// ── Collaborator configuration ────────────────────────────────────────────────

/// Configuration for the spreadsheet feed client.
///
/// Constructed explicitly and passed in; library code never reads the process
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetConfig {
    pub sheet_id: String,
}

impl SheetConfig {
    /// Validate the id shape up front: letters, digits, `-` and `_` only.
    pub fn new(sheet_id: impl Into<String>) -> Result<Self> {
        let sheet_id = sheet_id.into();
        let re = Regex::new(r"^[A-Za-z0-9_-]+$").expect("regex is valid");
        if sheet_id.is_empty() || !re.is_match(&sheet_id) {
            return Err(RosterError::InvalidSheetId(sheet_id));
        }
        Ok(Self { sheet_id })
    }
}

/// Configuration for the profile-lookup client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileApiConfig {
    pub host: String,
    pub api_key: String,
}
