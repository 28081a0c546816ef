// Codeforces analytics builder.
//
// Given the profile record, rating history and submission feed, compute:
// 1. The deduplicated solved-set (one entry per problem identity)
// 2. A topic table from the first accepted submission of each problem
// 3. An activity calendar from every accepted submission
// 4. A contest summary from the rating history
//
// The calendar counts resubmissions while the topic table does not: the
// calendar tracks activity, the topic table tracks unique solves.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::analytics::models::{
    ActivityCalendar, Breakdown, ContestSummary, Platform, PlatformAnalytics, RankProfile,
    RecentContest, TopicFrequencyTable, RECENT_CONTEST_LIMIT, UNRATED,
};
use crate::codeforces::client::{CodeforcesFeed, ProblemKey, RatingChange, Submission, UserInfo};
use crate::error::AnalyticsError;
use crate::merge::calendar::date_for_timestamp;

/// Topics kept in a Codeforces topic table.
pub const MAX_TOPICS: usize = 200;

/// What the submission feed contributes to the analytics.
#[derive(Debug, Default)]
pub struct SubmissionSummary {
    pub solved: HashSet<ProblemKey>,
    pub topics: TopicFrequencyTable,
    pub calendar: ActivityCalendar,
}

/// Fetch all three Codeforces feeds for `handle` and build its analytics.
///
/// The profile fetch goes first: if it fails the handle is treated as
/// unknown and nothing else is requested. Rating history and submissions
/// are then fetched concurrently, each degrading to empty on failure.
pub async fn fetch_analytics(
    feed: &dyn CodeforcesFeed,
    handle: &str,
) -> Result<PlatformAnalytics, AnalyticsError> {
    let handle = handle.trim();
    if handle.is_empty() {
        return Err(AnalyticsError::InvalidRequest(
            "Codeforces handle must not be empty".to_string(),
        ));
    }

    info!(handle = handle, "Fetching Codeforces analytics");

    let user = feed.user_info(handle).await.map_err(|e| {
        warn!(handle = handle, error = %e, "Codeforces profile lookup failed");
        AnalyticsError::not_found(Platform::Codeforces, handle, e.to_string())
    })?;

    let (rating, submissions) =
        tokio::join!(feed.rating_history(handle), feed.submissions(handle));

    let rating = rating.unwrap_or_else(|e| {
        warn!(handle = handle, error = %e, "Codeforces rating history unavailable");
        Vec::new()
    });
    let submissions = submissions.unwrap_or_else(|e| {
        warn!(handle = handle, error = %e, "Codeforces submissions unavailable");
        Vec::new()
    });

    let analytics = build_analytics(handle, &user, &rating, &submissions, Utc::now());

    info!(
        handle = analytics.identifier.as_str(),
        solved = analytics.total_solved,
        contests = analytics.contest.attended_contests,
        topics = analytics.topics.len(),
        "Built Codeforces analytics"
    );

    Ok(analytics)
}

/// Assemble analytics from already-fetched feeds. Pure.
pub fn build_analytics(
    handle: &str,
    user: &UserInfo,
    rating_history: &[RatingChange],
    submissions: &[Submission],
    fetched_at: DateTime<Utc>,
) -> PlatformAnalytics {
    let summary = summarize_submissions(submissions);

    let identifier = if user.handle.is_empty() {
        handle.to_string()
    } else {
        user.handle.clone()
    };

    PlatformAnalytics {
        platform: Platform::Codeforces,
        identifier,
        total_solved: summary.solved.len() as u64,
        breakdown: Breakdown::Rank(rank_profile(user)),
        calendar: summary.calendar.to_date_keyed(),
        contest: contest_summary(user, rating_history),
        topics: summary.topics.truncated(MAX_TOPICS),
        success: true,
        fetched_at,
    }
}

/// Walk the submission feed once, collecting solves, topics and activity.
///
/// Only accepted submissions count. A submission whose timestamp cannot be
/// represented as a date still counts as a solve but adds no activity.
pub fn summarize_submissions(submissions: &[Submission]) -> SubmissionSummary {
    let mut solved = HashSet::new();
    let mut topic_counts: HashMap<String, u64> = HashMap::new();
    let mut calendar = ActivityCalendar::new();

    for submission in submissions.iter().filter(|s| s.is_accepted()) {
        match date_for_timestamp(submission.creation_time_seconds) {
            Some(date) => calendar.add(date, 1),
            None => warn!(
                timestamp = submission.creation_time_seconds,
                "Submission timestamp out of range, leaving it off the calendar"
            ),
        }

        // First accepted submission per problem attributes its tags
        if !solved.insert(submission.problem.key()) {
            continue;
        }
        for tag in &submission.problem.tags {
            *topic_counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    SubmissionSummary {
        solved,
        topics: TopicFrequencyTable::from_counts(topic_counts),
        calendar,
    }
}

fn rank_profile(user: &UserInfo) -> RankProfile {
    RankProfile {
        rating: user.rating,
        max_rating: user.max_rating,
        rank: user.rank.clone().unwrap_or_else(|| UNRATED.to_string()),
        max_rank: user.max_rank.clone().unwrap_or_else(|| UNRATED.to_string()),
    }
}

/// Contest summary: rating from the profile, history length as attendance,
/// and the last few history entries in feed order.
fn contest_summary(user: &UserInfo, history: &[RatingChange]) -> ContestSummary {
    let start = history.len().saturating_sub(RECENT_CONTEST_LIMIT);
    let recent_contests = history[start..]
        .iter()
        .map(|c| RecentContest {
            contest_name: c.contest_name.clone(),
            rank: c.rank,
            old_rating: c.old_rating,
            new_rating: c.new_rating,
        })
        .collect();

    ContestSummary {
        rating: user.rating,
        global_ranking: None,
        attended_contests: history.len() as u64,
        recent_contests,
    }
}
