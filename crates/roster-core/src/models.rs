use serde::{Deserialize, Serialize};

/// Current version of the snapshot document layout.
pub const SCHEMA_VERSION: u32 = 1;

/// Lifecycle state of one tracked account.
///
/// The spreadsheet uses localized labels; [`AccountStatus::from_label`] maps
/// the two recognised ones and preserves anything else verbatim so that
/// human-entered values survive the round trip to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Blocked,
    #[serde(untagged)]
    Other(String),
}

impl AccountStatus {
    /// Map a raw spreadsheet label to a status.
    ///
    /// `"activa"` and `"bloqueada"` are matched case-insensitively; any other
    /// label is kept as-is.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "activa" => AccountStatus::Active,
            "bloqueada" => AccountStatus::Blocked,
            _ => AccountStatus::Other(trimmed.to_string()),
        }
    }

    /// Whether the account should be considered for profile enrichment.
    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

/// One parsed spreadsheet row.
///
/// Created once per fetch and immutable afterwards; never persisted on its
/// own, only through the summaries derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The raw cell text the fields were split from.
    pub content: String,
    /// Platform name, capitalized.
    pub platform: String,
    pub username: String,
    pub administrator: String,
    pub status: AccountStatus,
}

/// Profile statistics returned by a profile-lookup service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub full_name: String,
    pub biography: String,
    pub followers_count: u64,
    pub following_count: u64,
    /// URL of the profile photo.
    pub profile_photo: String,
    pub feed_items_count: u64,
}

/// One account as it appears inside a platform summary.
///
/// `data` stays `None` until (and unless) the enrichment pass fills it in,
/// and is omitted from the serialized document while absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub username: String,
    pub administrator: String,
    pub status: AccountStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ProfileStats>,
}

/// Per-status totals for one platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: u32,
    pub active: u32,
    pub blocked: u32,
}

/// All accounts of one platform, with status totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSummary {
    pub platform: String,
    pub accounts: Vec<Account>,
    pub counts: StatusCounts,
}

/// Number of accounts one administrator manages on one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformCount {
    pub platform: String,
    pub count: u32,
}

/// Account totals for one administrator, broken down by platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub administrator: String,
    pub total_count: u32,
    pub by_platform: Vec<PlatformCount>,
}

/// The single aggregated document produced per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Last-modified timestamp reported by the spreadsheet feed.
    pub updated_at: String,
    pub platforms: Vec<String>,
    pub accounts: Vec<PlatformSummary>,
    pub administrators: Vec<AdminSummary>,
    /// Local wall-clock time the snapshot was generated, 12-hour format.
    pub generated_at: String,
    pub week_of_month: u32,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Result of one spreadsheet fetch: the feed timestamp plus the raw row texts.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetFeed {
    pub updated_at: String,
    pub rows: Vec<String>,
}
