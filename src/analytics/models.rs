// Analytics value types: the unified schema every platform normalizes into.
//
// All types are plain immutable values built fresh per request. The two
// ordered containers (ActivityCalendar, TopicFrequencyTable) carry their
// ordering invariant in the type so serialization can never emit them out
// of order.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The upstream platforms the pipeline knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    LeetCode,
    Codeforces,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::LeetCode => "leetcode",
            Platform::Codeforces => "codeforces",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -- Activity calendar --

/// Calendar date -> activity count, always iterated in ascending date order.
///
/// Serializes as a JSON object keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActivityCalendar(BTreeMap<NaiveDate, u64>);

impl ActivityCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` to the given date, summing with anything already there.
    pub fn add(&mut self, date: NaiveDate, count: u64) {
        let total = self.0.entry(date).or_insert(0);
        *total = total.saturating_add(count);
    }

    pub fn get(&self, date: NaiveDate) -> Option<u64> {
        self.0.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate (date, count) pairs in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u64)> + '_ {
        self.0.iter().map(|(d, c)| (*d, *c))
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.0.values().fold(0, |acc, c| acc.saturating_add(*c))
    }

    /// Render as ISO-date string keys (the Codeforces-native calendar shape).
    pub fn to_date_keyed(&self) -> BTreeMap<String, u64> {
        self.0
            .iter()
            .map(|(d, c)| (d.format("%Y-%m-%d").to_string(), *c))
            .collect()
    }
}

// -- Topic frequency --

/// Topic name -> solved count, ordered by descending count.
///
/// Equal counts are ordered by topic name so output is deterministic.
/// Serializes as a JSON object whose key order is the table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicFrequencyTable {
    entries: Vec<(String, u64)>,
}

impl TopicFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sorted table from raw counts.
    pub fn from_counts(counts: HashMap<String, u64>) -> Self {
        let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Self { entries }
    }

    pub fn get(&self, topic: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(name, _)| name == topic)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate (topic, count) pairs in table order (descending count).
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// The first `n` topic names in table order.
    pub fn top(&self, n: usize) -> Vec<String> {
        self.entries
            .iter()
            .take(n)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Keep only the `n` most frequent topics.
    pub fn truncated(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }
}

/// Collect (topic, count) pairs into a sorted table. Duplicate topics are
/// summed, saturating at `u64::MAX`.
impl<S: Into<String>> FromIterator<(S, u64)> for TopicFrequencyTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for (name, count) in iter {
            let total = counts.entry(name.into()).or_insert(0);
            *total = total.saturating_add(count);
        }
        Self::from_counts(counts)
    }
}

impl Serialize for TopicFrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, count) in &self.entries {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

// -- Breakdown and contest records --

/// Solved problems per difficulty (LeetCode).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyBreakdown {
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
}

/// Rating and rank titles (Codeforces).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankProfile {
    pub rating: Option<i64>,
    pub max_rating: Option<i64>,
    pub rank: String,
    pub max_rank: String,
}

impl Default for RankProfile {
    fn default() -> Self {
        Self {
            rating: None,
            max_rating: None,
            rank: UNRATED.to_string(),
            max_rank: UNRATED.to_string(),
        }
    }
}

/// Rank title used when the platform reports none.
pub const UNRATED: &str = "unrated";

/// The platform-specific breakdown attached to a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Breakdown {
    #[serde(rename = "difficultyBreakdown")]
    Difficulty(DifficultyBreakdown),
    #[serde(rename = "profile")]
    Rank(RankProfile),
}

/// One entry of a contest history slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentContest {
    pub contest_name: String,
    pub rank: i64,
    pub old_rating: i64,
    pub new_rating: i64,
}

/// Aggregate contest statistics plus a bounded recent-history slice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestSummary {
    pub rating: Option<i64>,
    pub global_ranking: Option<i64>,
    pub attended_contests: u64,
    pub recent_contests: Vec<RecentContest>,
}

/// Number of contest history entries kept in `recent_contests`.
pub const RECENT_CONTEST_LIMIT: usize = 5;

// -- Per-platform analytics --

/// Everything one platform builder computes for one user.
///
/// `calendar` keeps the platform-native keying: Unix-seconds strings for
/// LeetCode, ISO dates for Codeforces. Normalization happens in the merger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAnalytics {
    pub platform: Platform,
    pub identifier: String,
    pub total_solved: u64,
    #[serde(flatten)]
    pub breakdown: Breakdown,
    pub calendar: BTreeMap<String, u64>,
    pub contest: ContestSummary,
    #[serde(rename = "topicAnalysis")]
    pub topics: TopicFrequencyTable,
    pub success: bool,
    pub fetched_at: DateTime<Utc>,
}

impl PlatformAnalytics {
    pub fn difficulty(&self) -> Option<&DifficultyBreakdown> {
        match &self.breakdown {
            Breakdown::Difficulty(d) => Some(d),
            Breakdown::Rank(_) => None,
        }
    }

    pub fn rank_profile(&self) -> Option<&RankProfile> {
        match &self.breakdown {
            Breakdown::Rank(r) => Some(r),
            Breakdown::Difficulty(_) => None,
        }
    }
}
