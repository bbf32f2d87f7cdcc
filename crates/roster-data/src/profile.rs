//! Profile-lookup capability and its HTTP implementation.
//!
//! Platform-specific statistics fetchers implement [`ProfileSource`]; the
//! enricher holds them behind trait objects, so adding a platform handler
//! never touches the aggregation or snapshot code.

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use roster_core::error::{Result, RosterError};
use roster_core::models::ProfileStats;
use roster_core::settings::ProfileApiConfig;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// ── ProfileSource ─────────────────────────────────────────────────────────────

/// Capability to look up profile statistics for one username.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the stats for `username`.
    ///
    /// Fails with [`RosterError::ProfileFetch`] on network failure, a non-2xx
    /// response, or an undecodable payload. Callers treat this as
    /// recoverable: the account keeps `data: null` and the batch continues.
    async fn fetch_profile(&self, username: &str) -> Result<ProfileStats>;
}

// ── Username validation ───────────────────────────────────────────────────────

/// Letters, digits, `.` and `_` only; anything else (or empty) is rejected
/// before a request is built.
pub fn ensure_valid_username(username: &str) -> Result<()> {
    let re = Regex::new(r"^[A-Za-z0-9._]+$").expect("regex is valid");
    if username.is_empty() || !re.is_match(username) {
        return Err(RosterError::InvalidUsername(username.to_string()));
    }
    Ok(())
}

// ── RapidApiProfileClient ─────────────────────────────────────────────────────

/// Wire shape of the profile-lookup response.
///
/// Kept separate from [`ProfileStats`] because the upstream photo key
/// (`profilePhotoHd`) differs from the one we persist (`profilePhoto`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfilePayload {
    full_name: String,
    biography: String,
    followers_count: u64,
    following_count: u64,
    profile_photo_hd: String,
    feed_items_count: u64,
}

impl From<ProfilePayload> for ProfileStats {
    fn from(payload: ProfilePayload) -> Self {
        ProfileStats {
            full_name: payload.full_name,
            biography: payload.biography,
            followers_count: payload.followers_count,
            following_count: payload.following_count,
            profile_photo: payload.profile_photo_hd,
            feed_items_count: payload.feed_items_count,
        }
    }
}

/// Profile-lookup client for a RapidAPI-style service: key and host travel
/// as request headers, the username as a path segment.
pub struct RapidApiProfileClient {
    config: ProfileApiConfig,
    http: reqwest::Client,
}

impl RapidApiProfileClient {
    pub fn new(config: ProfileApiConfig) -> Result<Self> {
        if config.host.is_empty() {
            return Err(RosterError::Config(
                "profile API host must not be empty".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| RosterError::Config(e.to_string()))?;
        Ok(Self { config, http })
    }

    fn profile_url(&self, username: &str) -> String {
        format!("https://{}/v1/profile/{}", self.config.host, username)
    }

    fn fetch_error(username: &str, reason: impl Into<String>) -> RosterError {
        RosterError::ProfileFetch {
            username: username.to_string(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ProfileSource for RapidApiProfileClient {
    async fn fetch_profile(&self, username: &str) -> Result<ProfileStats> {
        ensure_valid_username(username)?;

        let url = self.profile_url(username);
        debug!(username = %username, "fetching profile stats");

        let response = self
            .http
            .get(&url)
            .header("X-Rapidapi-Key", &self.config.api_key)
            .header("X-Rapidapi-Host", &self.config.host)
            .send()
            .await
            .map_err(|e| Self::fetch_error(username, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::fetch_error(
                username,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let payload: ProfilePayload = response
            .json()
            .await
            .map_err(|e| Self::fetch_error(username, e.to_string()))?;

        Ok(payload.into())
    }
}
