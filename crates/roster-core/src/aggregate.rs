//! Aggregation of parsed records along the two inventory dimensions:
//! platform and administrator.
//!
//! All functions here are pure and deterministic: no I/O, and input order
//! affects only the first-seen ordering of the output lists, never counts or
//! membership.

use std::collections::HashSet;

use crate::models::{
    Account, AdminSummary, AccountStatus, PlatformCount, PlatformSummary, Record, StatusCounts,
};

// ── Platform dimension ────────────────────────────────────────────────────────

/// Distinct platform names in first-seen order.
///
/// Deduplication is case-insensitive; the first spelling encountered wins.
pub fn list_platforms(records: &[Record]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut platforms = Vec::new();
    for record in records {
        if seen.insert(record.platform.to_lowercase()) {
            platforms.push(record.platform.clone());
        }
    }
    platforms
}

/// All accounts on `platform` (matched case-insensitively) with status totals.
///
/// A platform with no matching records yields an empty but valid summary.
pub fn summarize_by_platform(records: &[Record], platform: &str) -> PlatformSummary {
    let wanted = platform.to_lowercase();
    let mut accounts = Vec::new();
    let mut counts = StatusCounts::default();

    for record in records {
        if record.platform.to_lowercase() != wanted {
            continue;
        }
        match record.status {
            AccountStatus::Active => counts.active += 1,
            AccountStatus::Blocked => counts.blocked += 1,
            // Unmapped statuses count toward the total only.
            AccountStatus::Other(_) => {}
        }
        counts.total += 1;
        accounts.push(Account {
            username: record.username.clone(),
            administrator: record.administrator.clone(),
            status: record.status.clone(),
            data: None,
        });
    }

    PlatformSummary {
        platform: platform.to_string(),
        accounts,
        counts,
    }
}

// ── Administrator dimension ───────────────────────────────────────────────────

/// Distinct administrator names (exact match) in first-seen order.
pub fn list_administrators(records: &[Record]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut admins = Vec::new();
    for record in records {
        if seen.insert(record.administrator.as_str()) {
            admins.push(record.administrator.clone());
        }
    }
    admins
}

/// Account totals for `admin` (exact match), broken down by platform.
///
/// The breakdown reuses [`list_platforms`] and [`summarize_by_platform`] on
/// the administrator's subset; each entry's count is that platform summary's
/// total.
pub fn summarize_by_administrator(records: &[Record], admin: &str) -> AdminSummary {
    let subset: Vec<Record> = records
        .iter()
        .filter(|r| r.administrator == admin)
        .cloned()
        .collect();

    let by_platform = list_platforms(&subset)
        .into_iter()
        .map(|platform| {
            let summary = summarize_by_platform(&subset, &platform);
            PlatformCount {
                platform,
                count: summary.counts.total,
            }
        })
        .collect();

    AdminSummary {
        administrator: admin.to_string(),
        total_count: subset.len() as u32,
        by_platform,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_record;

    fn records(rows: &[&str]) -> Vec<Record> {
        rows.iter().map(|r| parse_record(r).unwrap()).collect()
    }

    fn sample() -> Vec<Record> {
        records(&[
            "Platform: instagram, Username: @uno, Administrator: Ana, Status: Activa",
            "Platform: instagram, Username: @dos, Administrator: Beto, Status: Bloqueada",
            "Platform: twitter, Username: @tres, Administrator: Ana, Status: Activa",
            "Platform: Instagram, Username: @cuatro, Administrator: Ana, Status: Activa",
        ])
    }

    // ── list_platforms ────────────────────────────────────────────────────────

    #[test]
    fn test_list_platforms_dedup_first_seen_order() {
        let platforms = list_platforms(&sample());
        assert_eq!(platforms, vec!["Instagram", "Twitter"]);
    }

    #[test]
    fn test_list_platforms_no_duplicates_case_insensitive() {
        let recs = records(&[
            "Platform: instagram, Username: @a, Administrator: X, Status: Activa",
            "Platform: INSTAGRAM, Username: @b, Administrator: X, Status: Activa",
        ]);
        assert_eq!(list_platforms(&recs).len(), 1);
    }

    #[test]
    fn test_list_platforms_empty_input() {
        assert!(list_platforms(&[]).is_empty());
    }

    // ── summarize_by_platform ─────────────────────────────────────────────────

    #[test]
    fn test_summarize_by_platform_counts() {
        let summary = summarize_by_platform(&sample(), "Instagram");
        assert_eq!(summary.platform, "Instagram");
        assert_eq!(summary.counts.total, 3);
        assert_eq!(summary.counts.active, 2);
        assert_eq!(summary.counts.blocked, 1);
        assert_eq!(summary.accounts.len(), 3);
    }

    #[test]
    fn test_summarize_by_platform_match_is_case_insensitive() {
        let summary = summarize_by_platform(&sample(), "INSTAGRAM");
        assert_eq!(summary.counts.total, 3);
    }

    #[test]
    fn test_summarize_by_platform_total_splits_when_statuses_map() {
        let summary = summarize_by_platform(&sample(), "Instagram");
        assert_eq!(
            summary.counts.total,
            summary.counts.active + summary.counts.blocked
        );
    }

    #[test]
    fn test_summarize_by_platform_other_status_counts_total_only() {
        let recs = records(&[
            "Platform: tiktok, Username: @a, Administrator: X, Status: Pendiente",
            "Platform: tiktok, Username: @b, Administrator: X, Status: Activa",
        ]);
        let summary = summarize_by_platform(&recs, "Tiktok");
        assert_eq!(summary.counts.total, 2);
        assert_eq!(summary.counts.active, 1);
        assert_eq!(summary.counts.blocked, 0);
    }

    #[test]
    fn test_summarize_by_platform_zero_matches_is_valid() {
        let summary = summarize_by_platform(&sample(), "Facebook");
        assert_eq!(summary.platform, "Facebook");
        assert!(summary.accounts.is_empty());
        assert_eq!(summary.counts, StatusCounts::default());
    }

    #[test]
    fn test_summarize_accounts_carry_no_profile_data() {
        let summary = summarize_by_platform(&sample(), "Twitter");
        assert!(summary.accounts.iter().all(|a| a.data.is_none()));
    }

    // ── list_administrators ───────────────────────────────────────────────────

    #[test]
    fn test_list_administrators_dedup_exact() {
        let admins = list_administrators(&sample());
        assert_eq!(admins, vec!["Ana", "Beto"]);
    }

    #[test]
    fn test_list_administrators_exact_match_preserves_case_variants() {
        let recs = records(&[
            "Platform: instagram, Username: @a, Administrator: ana, Status: Activa",
            "Platform: instagram, Username: @b, Administrator: Ana, Status: Activa",
        ]);
        // Administrators are matched exactly, so "ana" and "Ana" are distinct.
        assert_eq!(list_administrators(&recs).len(), 2);
    }

    // ── summarize_by_administrator ────────────────────────────────────────────

    #[test]
    fn test_summarize_by_administrator() {
        let summary = summarize_by_administrator(&sample(), "Ana");
        assert_eq!(summary.administrator, "Ana");
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.by_platform.len(), 2);
        assert_eq!(summary.by_platform[0].platform, "Instagram");
        assert_eq!(summary.by_platform[0].count, 2);
        assert_eq!(summary.by_platform[1].platform, "Twitter");
        assert_eq!(summary.by_platform[1].count, 1);
    }

    #[test]
    fn test_summarize_by_administrator_zero_matches_is_valid() {
        let summary = summarize_by_administrator(&sample(), "Nadie");
        assert_eq!(summary.total_count, 0);
        assert!(summary.by_platform.is_empty());
    }

    #[test]
    fn test_breakdown_totals_match_overall_total() {
        let summary = summarize_by_administrator(&sample(), "Ana");
        let breakdown_sum: u32 = summary.by_platform.iter().map(|p| p.count).sum();
        assert_eq!(breakdown_sum, summary.total_count);
    }

    // ── Order independence ────────────────────────────────────────────────────

    #[test]
    fn test_aggregation_is_order_independent() {
        let forward = sample();
        let mut reversed = sample();
        reversed.reverse();

        let fwd = summarize_by_platform(&forward, "Instagram");
        let rev = summarize_by_platform(&reversed, "Instagram");
        assert_eq!(fwd.counts, rev.counts);
        assert_eq!(fwd.accounts.len(), rev.accounts.len());

        let fwd_admin = summarize_by_administrator(&forward, "Ana");
        let rev_admin = summarize_by_administrator(&reversed, "Ana");
        assert_eq!(fwd_admin.total_count, rev_admin.total_count);

        let mut fwd_platforms = list_platforms(&forward);
        let mut rev_platforms = list_platforms(&reversed);
        fwd_platforms.sort();
        rev_platforms.sort();
        assert_eq!(fwd_platforms, rev_platforms);
    }
}
