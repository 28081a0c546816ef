// UnifiedReport: the single JSON document a combined request produces.
//
// Built from whichever platform analytics are present. Absent platforms
// contribute empty calendars/topics and zero totals, and serialize as null
// in the per-platform sections.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analytics::models::{
    ActivityCalendar, ContestSummary, DifficultyBreakdown, Platform, PlatformAnalytics,
    RankProfile, TopicFrequencyTable,
};
use crate::error::AnalyticsError;
use crate::merge::{merge_calendars, merge_topics};

/// Number of topics listed in `summary.topSkills` by default.
pub const DEFAULT_TOP_SKILLS: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedReport {
    pub profiles: Profiles,
    pub combined_metrics: CombinedMetrics,
    pub activity_calendar: ActivityCalendar,
    pub topic_analysis: TopicFrequencyTable,
    pub contest_data: ContestData,
    pub summary: Summary,
    /// Full per-platform analytics the report was built from.
    #[serde(skip)]
    pub leetcode: Option<PlatformAnalytics>,
    #[serde(skip)]
    pub codeforces: Option<PlatformAnalytics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Profiles {
    pub leetcode: Option<LeetCodeProfile>,
    pub codeforces: Option<CodeforcesProfile>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeProfile {
    pub username: String,
    pub total_solved: u64,
    pub difficulty_breakdown: DifficultyBreakdown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeforcesProfile {
    pub handle: String,
    pub profile: RankProfile,
    pub total_solved: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CombinedMetrics {
    #[serde(rename = "totalSolvedLeetCode")]
    pub total_solved_leetcode: u64,
    #[serde(rename = "totalSolvedCodeforces")]
    pub total_solved_codeforces: u64,
    #[serde(rename = "combinedTotal")]
    pub combined_total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContestData {
    pub leetcode: Option<ContestSummary>,
    pub codeforces: Option<ContestSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub platforms_covered: Vec<Platform>,
    pub last_updated: DateTime<Utc>,
    pub top_skills: Vec<String>,
}

/// Compose the unified report.
///
/// Fails if neither platform is present, or if a calendar key cannot be
/// normalized. `top_skills` relies on the merged topic table already being
/// sorted; nothing is re-sorted here.
pub fn compose(
    leetcode: Option<PlatformAnalytics>,
    codeforces: Option<PlatformAnalytics>,
    top_skills: usize,
    generated_at: DateTime<Utc>,
) -> Result<UnifiedReport, AnalyticsError> {
    if leetcode.is_none() && codeforces.is_none() {
        return Err(AnalyticsError::BothPlatformsFailed {
            leetcode: None,
            codeforces: None,
        });
    }

    let empty_calendar = BTreeMap::new();
    let empty_topics = TopicFrequencyTable::new();

    let activity_calendar = merge_calendars(
        leetcode.as_ref().map_or(&empty_calendar, |a| &a.calendar),
        codeforces.as_ref().map_or(&empty_calendar, |a| &a.calendar),
    )?;

    let topic_analysis = merge_topics(
        leetcode.as_ref().map_or(&empty_topics, |a| &a.topics),
        codeforces.as_ref().map_or(&empty_topics, |a| &a.topics),
    );

    let total_solved_leetcode = leetcode.as_ref().map_or(0, |a| a.total_solved);
    let total_solved_codeforces = codeforces.as_ref().map_or(0, |a| a.total_solved);

    let platforms_covered = [
        leetcode.as_ref().map(|_| Platform::LeetCode),
        codeforces.as_ref().map(|_| Platform::Codeforces),
    ]
    .into_iter()
    .flatten()
    .collect();

    Ok(UnifiedReport {
        profiles: Profiles {
            leetcode: leetcode.as_ref().map(|a| LeetCodeProfile {
                username: a.identifier.clone(),
                total_solved: a.total_solved,
                difficulty_breakdown: a.difficulty().copied().unwrap_or_default(),
            }),
            codeforces: codeforces.as_ref().map(|a| CodeforcesProfile {
                handle: a.identifier.clone(),
                profile: a.rank_profile().cloned().unwrap_or_default(),
                total_solved: a.total_solved,
            }),
        },
        combined_metrics: CombinedMetrics {
            total_solved_leetcode,
            total_solved_codeforces,
            combined_total: total_solved_leetcode.saturating_add(total_solved_codeforces),
        },
        summary: Summary {
            platforms_covered,
            last_updated: generated_at,
            top_skills: topic_analysis.top(top_skills),
        },
        activity_calendar,
        topic_analysis,
        contest_data: ContestData {
            leetcode: leetcode.as_ref().map(|a| a.contest.clone()),
            codeforces: codeforces.as_ref().map(|a| a.contest.clone()),
        },
        leetcode,
        codeforces,
    })
}
