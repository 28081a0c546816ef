// LeetCode analytics builder.
//
// Totals and the difficulty split come straight from the upstream stats;
// they are never recomputed from the solved list, which may be a bounded
// sample of recent solves. The solved list is only used to attribute
// topics through the problem catalog.
//
// Only the stats fetch is essential. Calendar, contest and solved list each
// fall back to their empty default on failure without affecting the others.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::analytics::models::{
    Breakdown, ContestSummary, DifficultyBreakdown, Platform, PlatformAnalytics, RecentContest,
    TopicFrequencyTable, RECENT_CONTEST_LIMIT,
};
use crate::error::AnalyticsError;
use crate::leetcode::catalog::{CatalogSource, ProblemCatalog, ProblemCatalogCache};
use crate::leetcode::client::{ContestResponse, LeetCodeFeed, ProfileStats};

/// Rating every LeetCode account starts contests with.
const INITIAL_CONTEST_RATING: i64 = 1500;

/// Trim and lowercase a username; blank names are rejected.
pub fn normalize_username(username: &str) -> Result<String, AnalyticsError> {
    let username = username.trim().to_lowercase();
    if username.is_empty() {
        return Err(AnalyticsError::InvalidRequest(
            "Invalid username provided".to_string(),
        ));
    }
    Ok(username)
}

/// Fetch the LeetCode feeds for `username` and build its analytics.
///
/// The four per-user feeds are fetched concurrently. The catalog is only
/// consulted when there are solved slugs to attribute.
pub async fn fetch_analytics(
    feed: &dyn LeetCodeFeed,
    catalog_source: &dyn CatalogSource,
    cache: &ProblemCatalogCache,
    username: &str,
) -> Result<PlatformAnalytics, AnalyticsError> {
    let username = normalize_username(username)?;
    let user = username.as_str();

    info!(username = user, "Fetching LeetCode analytics");

    let (stats, calendar, contest, solved) = tokio::join!(
        feed.profile_stats(user),
        feed.calendar(user),
        feed.contest(user),
        feed.solved(user),
    );

    let stats = stats.map_err(|e| {
        warn!(username = user, error = %e, "LeetCode stats lookup failed");
        AnalyticsError::not_found(Platform::LeetCode, user, format!("User not found or API error: {e}"))
    })?;

    let calendar = calendar
        .and_then(|c| c.into_timestamp_map())
        .unwrap_or_else(|e| {
            warn!(username = user, error = %e, "LeetCode calendar unavailable");
            BTreeMap::new()
        });

    let contest = match contest {
        Ok(resp) => contest_summary(&resp),
        Err(e) => {
            warn!(username = user, error = %e, "LeetCode contest data unavailable");
            ContestSummary::default()
        }
    };

    let topics = match solved {
        Ok(resp) => {
            let slugs = resp.slugs();
            if slugs.is_empty() {
                TopicFrequencyTable::new()
            } else {
                let catalog = cache.get_or_refresh(catalog_source).await;
                build_topic_table(&slugs, &catalog)
            }
        }
        Err(e) => {
            warn!(username = user, error = %e, "LeetCode solved list unavailable");
            TopicFrequencyTable::new()
        }
    };

    let analytics = build_analytics(user, &stats, calendar, contest, topics, Utc::now());

    info!(
        username = analytics.identifier.as_str(),
        solved = analytics.total_solved,
        calendar_days = analytics.calendar.len(),
        topics = analytics.topics.len(),
        "Built LeetCode analytics"
    );

    Ok(analytics)
}

/// Assemble analytics from already-fetched parts. Pure.
pub fn build_analytics(
    username: &str,
    stats: &ProfileStats,
    calendar: BTreeMap<String, u64>,
    contest: ContestSummary,
    topics: TopicFrequencyTable,
    fetched_at: DateTime<Utc>,
) -> PlatformAnalytics {
    let identifier = stats
        .username
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| username.to_string());

    PlatformAnalytics {
        platform: Platform::LeetCode,
        identifier,
        total_solved: stats.total_solved,
        breakdown: Breakdown::Difficulty(DifficultyBreakdown {
            easy: stats.easy_solved,
            medium: stats.medium_solved,
            hard: stats.hard_solved,
        }),
        calendar,
        contest,
        topics,
        success: true,
        fetched_at,
    }
}

/// Count solved problems per topic. Slugs missing from the catalog are
/// skipped silently; they are usually problems newer than the cached copy.
pub fn build_topic_table(slugs: &[String], catalog: &ProblemCatalog) -> TopicFrequencyTable {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for slug in slugs {
        let Some(tags) = catalog.tags(slug) else {
            continue;
        };
        for tag in tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    TopicFrequencyTable::from_counts(counts)
}

/// Contest summary from the ranking record.
///
/// The rating is reported fractional and rounded here. Recent contests are
/// the last attended entries of the participation history; each entry only
/// carries the rating after the contest, so the rating before is taken from
/// the previous attended entry.
pub fn contest_summary(resp: &ContestResponse) -> ContestSummary {
    let mut previous = INITIAL_CONTEST_RATING;
    let history: Vec<RecentContest> = resp
        .contest_participation
        .iter()
        .filter(|p| p.attended)
        .map(|p| {
            let new_rating = p.rating.round() as i64;
            let entry = RecentContest {
                contest_name: p.contest.title.clone(),
                rank: p.ranking,
                old_rating: previous,
                new_rating,
            };
            previous = new_rating;
            entry
        })
        .collect();

    let attended_contests = resp
        .attended_contests_count
        .unwrap_or(history.len() as u64);

    let start = history.len().saturating_sub(RECENT_CONTEST_LIMIT);

    ContestSummary {
        rating: resp.rating.map(|r| r.round() as i64),
        global_ranking: resp.ranking,
        attended_contests,
        recent_contests: history[start..].to_vec(),
    }
}
