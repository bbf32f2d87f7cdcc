//! Rate-limited profile enrichment.
//!
//! Walks the per-platform summaries and fills in profile statistics for
//! active accounts, strictly sequentially: the upstream API enforces a
//! request ceiling per time window, so concurrent fetching is off the table.
//! After every `batch_size` fetch attempts the loop sleeps for the cooldown
//! interval before continuing.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info, warn};

use roster_core::models::PlatformSummary;

use crate::profile::ProfileSource;

/// Fetch attempts allowed before a cooldown pause.
const DEFAULT_BATCH_SIZE: u32 = 5;
/// How long to pause once the batch is exhausted.
const DEFAULT_COOLDOWN: Duration = Duration::from_secs(90);

// ── EnrichReport ──────────────────────────────────────────────────────────────

/// What one enrichment pass did, for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Profile lookups attempted (successes and failures).
    pub attempted: u32,
    /// Accounts that received profile data.
    pub enriched: u32,
    /// Lookups that failed; those accounts keep `data: null`.
    pub failed: u32,
    /// Accounts skipped because their status is not active.
    pub skipped: u32,
    /// Cooldown pauses taken.
    pub cooldowns: u32,
}

// ── Enricher ──────────────────────────────────────────────────────────────────

/// Registry of platform handlers plus the throttled enrichment loop.
///
/// Handlers are registered per platform name (case-insensitive); platforms
/// without a handler pass through untouched, so registering a new platform
/// never requires changes to the aggregation or snapshot code.
pub struct Enricher {
    sources: HashMap<String, Box<dyn ProfileSource>>,
    batch_size: u32,
    cooldown: Duration,
}

impl Enricher {
    /// Enricher with the production pacing (5 attempts, 90 s cooldown).
    pub fn new() -> Self {
        Self::with_pacing(DEFAULT_BATCH_SIZE, DEFAULT_COOLDOWN)
    }

    /// Enricher with explicit pacing. Tests use a zero cooldown to observe
    /// throttling behaviour without real sleeps.
    pub fn with_pacing(batch_size: u32, cooldown: Duration) -> Self {
        Self {
            sources: HashMap::new(),
            batch_size: batch_size.max(1),
            cooldown,
        }
    }

    /// Register the profile handler for `platform`.
    pub fn register(&mut self, platform: impl Into<String>, source: Box<dyn ProfileSource>) {
        self.sources.insert(platform.into().to_lowercase(), source);
    }

    /// Whether a handler is registered for `platform`.
    pub fn has_handler(&self, platform: &str) -> bool {
        self.sources.contains_key(&platform.to_lowercase())
    }

    /// Run the enrichment pass over every summary with a registered handler.
    ///
    /// A failed lookup logs a warning and leaves that account's `data` as
    /// `None`; it never aborts the rest of the batch. The attempt counter is
    /// shared across platforms within the run.
    pub async fn enrich(&self, summaries: &mut [PlatformSummary]) -> EnrichReport {
        let mut report = EnrichReport::default();
        let mut attempts_in_batch: u32 = 0;

        for summary in summaries.iter_mut() {
            let Some(source) = self.sources.get(&summary.platform.to_lowercase()) else {
                debug!(platform = %summary.platform, "no profile handler registered; skipping");
                continue;
            };

            for account in &mut summary.accounts {
                if !account.status.is_active() {
                    report.skipped += 1;
                    continue;
                }

                if attempts_in_batch == self.batch_size {
                    info!(
                        "rate limit batch exhausted; cooling down for {:?}",
                        self.cooldown
                    );
                    tokio::time::sleep(self.cooldown).await;
                    report.cooldowns += 1;
                    attempts_in_batch = 0;
                }

                let username = account.username.trim_start_matches('@');
                report.attempted += 1;
                attempts_in_batch += 1;

                match source.fetch_profile(username).await {
                    Ok(stats) => {
                        account.data = Some(stats);
                        report.enriched += 1;
                    }
                    Err(err) => {
                        warn!(
                            platform = %summary.platform,
                            username = %username,
                            "profile fetch failed, keeping null data: {}",
                            err
                        );
                        report.failed += 1;
                    }
                }
            }
        }

        info!(
            "enrichment pass: {} attempted, {} enriched, {} failed, {} skipped, {} cooldowns",
            report.attempted, report.enriched, report.failed, report.skipped, report.cooldowns
        );
        report
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use roster_core::error::{Result, RosterError};
    use roster_core::models::{Account, AccountStatus, ProfileStats, StatusCounts};

    // ── Mock profile source ───────────────────────────────────────────────────

    #[derive(Default)]
    struct MockState {
        seen: Mutex<Vec<String>>,
    }

    struct MockSource {
        state: Arc<MockState>,
        fail_for: HashSet<String>,
    }

    impl MockSource {
        fn new(state: Arc<MockState>) -> Self {
            Self {
                state,
                fail_for: HashSet::new(),
            }
        }

        fn failing_for(state: Arc<MockState>, usernames: &[&str]) -> Self {
            Self {
                state,
                fail_for: usernames.iter().map(|u| u.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl ProfileSource for MockSource {
        async fn fetch_profile(&self, username: &str) -> Result<ProfileStats> {
            self.state.seen.lock().unwrap().push(username.to_string());
            if self.fail_for.contains(username) {
                return Err(RosterError::ProfileFetch {
                    username: username.to_string(),
                    reason: "HTTP 503".to_string(),
                });
            }
            Ok(ProfileStats {
                full_name: format!("Full {}", username),
                biography: String::new(),
                followers_count: 1,
                following_count: 1,
                profile_photo: String::new(),
                feed_items_count: 1,
            })
        }
    }

    fn account(username: &str, status: AccountStatus) -> Account {
        Account {
            username: username.to_string(),
            administrator: "Ana".to_string(),
            status,
            data: None,
        }
    }

    fn summary(platform: &str, accounts: Vec<Account>) -> PlatformSummary {
        let counts = StatusCounts {
            total: accounts.len() as u32,
            active: accounts
                .iter()
                .filter(|a| a.status.is_active())
                .count() as u32,
            blocked: 0,
        };
        PlatformSummary {
            platform: platform.to_string(),
            accounts,
            counts,
        }
    }

    fn active_accounts(n: usize) -> Vec<Account> {
        (0..n)
            .map(|i| account(&format!("@user{}", i), AccountStatus::Active))
            .collect()
    }

    fn zero_cooldown_enricher(state: &Arc<MockState>) -> Enricher {
        let mut enricher = Enricher::with_pacing(5, Duration::from_millis(0));
        enricher.register("Instagram", Box::new(MockSource::new(state.clone())));
        enricher
    }

    // ── Throttling ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_twelve_accounts_pause_exactly_twice() {
        let state = Arc::new(MockState::default());
        let enricher = zero_cooldown_enricher(&state);
        let mut summaries = vec![summary("Instagram", active_accounts(12))];

        let report = enricher.enrich(&mut summaries).await;

        assert_eq!(report.attempted, 12);
        assert_eq!(report.enriched, 12);
        assert_eq!(report.cooldowns, 2);
    }

    #[tokio::test]
    async fn test_exact_batch_size_has_no_cooldown() {
        let state = Arc::new(MockState::default());
        let enricher = zero_cooldown_enricher(&state);
        let mut summaries = vec![summary("Instagram", active_accounts(5))];

        let report = enricher.enrich(&mut summaries).await;
        assert_eq!(report.cooldowns, 0);
    }

    #[tokio::test]
    async fn test_batch_counter_spans_platforms() {
        let state = Arc::new(MockState::default());
        let mut enricher = Enricher::with_pacing(5, Duration::from_millis(0));
        enricher.register("Instagram", Box::new(MockSource::new(state.clone())));
        enricher.register("Twitter", Box::new(MockSource::new(state.clone())));
        let mut summaries = vec![
            summary("Instagram", active_accounts(3)),
            summary("Twitter", active_accounts(4)),
        ];

        // 7 attempts with a shared per-run counter: one pause before the 6th.
        let report = enricher.enrich(&mut summaries).await;
        assert_eq!(report.attempted, 7);
        assert_eq!(report.cooldowns, 1);
    }

    // ── Skipping and username handling ────────────────────────────────────────

    #[tokio::test]
    async fn test_non_active_accounts_are_skipped() {
        let state = Arc::new(MockState::default());
        let enricher = zero_cooldown_enricher(&state);
        let mut summaries = vec![summary(
            "Instagram",
            vec![
                account("@activa", AccountStatus::Active),
                account("@bloqueada", AccountStatus::Blocked),
                account("@rara", AccountStatus::Other("pendiente".to_string())),
            ],
        )];

        let report = enricher.enrich(&mut summaries).await;

        assert_eq!(report.attempted, 1);
        assert_eq!(report.skipped, 2);
        assert!(summaries[0].accounts[0].data.is_some());
        assert!(summaries[0].accounts[1].data.is_none());
        assert!(summaries[0].accounts[2].data.is_none());
    }

    #[tokio::test]
    async fn test_leading_at_is_stripped_for_lookup() {
        let state = Arc::new(MockState::default());
        let enricher = zero_cooldown_enricher(&state);
        let mut summaries = vec![summary(
            "Instagram",
            vec![account("@someone", AccountStatus::Active)],
        )];

        enricher.enrich(&mut summaries).await;

        assert_eq!(*state.seen.lock().unwrap(), vec!["someone".to_string()]);
        // The summary keeps the original handle spelling.
        assert_eq!(summaries[0].accounts[0].username, "@someone");
    }

    #[tokio::test]
    async fn test_platform_without_handler_is_untouched() {
        let state = Arc::new(MockState::default());
        let enricher = zero_cooldown_enricher(&state);
        let mut summaries = vec![summary("Facebook", active_accounts(3))];

        let report = enricher.enrich(&mut summaries).await;

        assert_eq!(report.attempted, 0);
        assert!(state.seen.lock().unwrap().is_empty());
        assert!(summaries[0].accounts.iter().all(|a| a.data.is_none()));
    }

    #[tokio::test]
    async fn test_handler_lookup_is_case_insensitive() {
        let state = Arc::new(MockState::default());
        let mut enricher = Enricher::with_pacing(5, Duration::from_millis(0));
        enricher.register("INSTAGRAM", Box::new(MockSource::new(state.clone())));
        assert!(enricher.has_handler("instagram"));

        let mut summaries = vec![summary("Instagram", active_accounts(1))];
        let report = enricher.enrich(&mut summaries).await;
        assert_eq!(report.enriched, 1);
    }

    // ── Failure policy ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_failed_fetch_keeps_null_and_continues() {
        let state = Arc::new(MockState::default());
        let mut enricher = Enricher::with_pacing(5, Duration::from_millis(0));
        enricher.register(
            "Instagram",
            Box::new(MockSource::failing_for(state.clone(), &["user1"])),
        );
        let mut summaries = vec![summary("Instagram", active_accounts(3))];

        let report = enricher.enrich(&mut summaries).await;

        assert_eq!(report.attempted, 3);
        assert_eq!(report.enriched, 2);
        assert_eq!(report.failed, 1);
        assert!(summaries[0].accounts[0].data.is_some());
        assert!(summaries[0].accounts[1].data.is_none());
        assert!(summaries[0].accounts[2].data.is_some());
    }

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_default_pacing() {
        let enricher = Enricher::new();
        assert_eq!(enricher.batch_size, 5);
        assert_eq!(enricher.cooldown, Duration::from_secs(90));
    }

    #[test]
    fn test_batch_size_floor_is_one() {
        let enricher = Enricher::with_pacing(0, Duration::from_millis(0));
        assert_eq!(enricher.batch_size, 1);
    }
}
