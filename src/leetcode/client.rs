// HTTP client for the LeetCode REST mirror.
//
// Endpoints used (all GET, unauthenticated):
//   /{username}            profile stats (totals and difficulty split)
//   /{username}/calendar   submission calendar
//   /{username}/contest    contest ranking
//   /{username}/solved     solved problem list
//   /problems              full problem catalog with topic tags
//
// The mirror is loose about shapes: the calendar arrives as a JSON-encoded
// string, solved entries may be slugs or objects, tags may be objects or
// strings. The serde types below accept every shape seen in the wild and
// normalize them behind small accessor methods.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::leetcode::catalog::CatalogSource;
use crate::merge::calendar::parse_timestamp_key;

/// Default LeetCode REST mirror endpoint.
pub const DEFAULT_LEETCODE_API_URL: &str = "https://alfa-leetcode-api.onrender.com";

/// Page size requested from `/problems` so one call returns the whole catalog.
const CATALOG_LIMIT: &str = "5000";

/// Read access to the per-user LeetCode feeds.
#[async_trait]
pub trait LeetCodeFeed: Send + Sync {
    async fn profile_stats(&self, username: &str) -> Result<ProfileStats>;
    async fn calendar(&self, username: &str) -> Result<CalendarResponse>;
    async fn contest(&self, username: &str) -> Result<ContestResponse>;
    async fn solved(&self, username: &str) -> Result<SolvedResponse>;
}

/// Thin reqwest wrapper over the LeetCode REST mirror.
pub struct LeetCodeClient {
    client: reqwest::Client,
    base_url: String,
    catalog_timeout: Duration,
}

impl LeetCodeClient {
    /// `timeout` applies to the per-user endpoints; the catalog is much
    /// larger and gets its own `catalog_timeout`.
    pub fn new(base_url: &str, timeout: Duration, catalog_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("codetally/0.1 (profile-analytics)")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            catalog_timeout,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        timeout: Option<Duration>,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);

        debug!(path = path, "LeetCode API request");

        let mut request = self.client.get(&url).query(params);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("LeetCode request failed: /{path}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("LeetCode /{path} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize LeetCode /{path} response"))
    }
}

#[async_trait]
impl LeetCodeFeed for LeetCodeClient {
    async fn profile_stats(&self, username: &str) -> Result<ProfileStats> {
        let stats: ProfileStats = self.get_json(username, &[], None).await?;
        if let Some(errors) = stats.errors.as_ref().filter(|e| !e.is_null()) {
            anyhow::bail!("LeetCode reported errors for {username}: {errors}");
        }
        Ok(stats)
    }

    async fn calendar(&self, username: &str) -> Result<CalendarResponse> {
        self.get_json(&format!("{username}/calendar"), &[], None).await
    }

    async fn contest(&self, username: &str) -> Result<ContestResponse> {
        self.get_json(&format!("{username}/contest"), &[], None).await
    }

    async fn solved(&self, username: &str) -> Result<SolvedResponse> {
        self.get_json(&format!("{username}/solved"), &[], None).await
    }
}

#[async_trait]
impl CatalogSource for LeetCodeClient {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogProblem>> {
        let resp: CatalogResponse = self
            .get_json("problems", &[("limit", CATALOG_LIMIT)], Some(self.catalog_timeout))
            .await?;
        Ok(resp.problems)
    }
}

// -- Serde types for /{username} --

/// Pre-aggregated solve counts. Missing counts read as zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub username: Option<String>,
    #[serde(default)]
    pub total_solved: u64,
    #[serde(default)]
    pub easy_solved: u64,
    #[serde(default)]
    pub medium_solved: u64,
    #[serde(default)]
    pub hard_solved: u64,
    /// GraphQL errors forwarded by the mirror for unknown users.
    pub errors: Option<serde_json::Value>,
}

// -- Serde types for /{username}/calendar --

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub submission_calendar: Option<CalendarPayload>,
}

/// The calendar either as a JSON object or as that object encoded in a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CalendarPayload {
    Map(BTreeMap<String, u64>),
    Encoded(String),
}

impl CalendarResponse {
    /// Decode into a Unix-seconds keyed map, validating every key.
    ///
    /// Fails if the encoded form is not valid JSON or if any key is not a
    /// Unix timestamp; the caller degrades the calendar to empty.
    pub fn into_timestamp_map(self) -> Result<BTreeMap<String, u64>> {
        let map = match self.submission_calendar {
            None => BTreeMap::new(),
            Some(CalendarPayload::Map(map)) => map,
            Some(CalendarPayload::Encoded(raw)) => serde_json::from_str(&raw)
                .context("submissionCalendar string is not a JSON object of counts")?,
        };

        for key in map.keys() {
            parse_timestamp_key(key)?;
        }
        Ok(map)
    }
}

// -- Serde types for /{username}/contest --

/// Contest ranking. The mirror has used both the short and the
/// `contest`-prefixed field names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestResponse {
    #[serde(alias = "contestRating")]
    pub rating: Option<f64>,
    #[serde(alias = "contestGlobalRanking")]
    pub ranking: Option<i64>,
    #[serde(alias = "contestAttend")]
    pub attended_contests_count: Option<u64>,
    #[serde(default)]
    pub contest_participation: Vec<ContestParticipation>,
}

/// One contest from the participation history, oldest first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestParticipation {
    pub contest: ContestRef,
    #[serde(default = "attended_by_default")]
    pub attended: bool,
    pub ranking: i64,
    /// Rating after this contest.
    pub rating: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContestRef {
    pub title: String,
}

fn attended_by_default() -> bool {
    true
}

// -- Serde types for /{username}/solved --

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvedResponse {
    #[serde(alias = "submission")]
    pub solved_problem: Option<SolvedList>,
}

/// Some mirror versions return only a count under `solvedProblem`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SolvedList {
    Entries(Vec<SolvedEntry>),
    Count(u64),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SolvedEntry {
    Slug(String),
    Record(SolvedRecord),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvedRecord {
    pub title_slug: Option<String>,
}

impl SolvedResponse {
    /// The solved problem slugs. Entries without a slug are skipped.
    pub fn slugs(&self) -> Vec<String> {
        match &self.solved_problem {
            Some(SolvedList::Entries(entries)) => entries
                .iter()
                .filter_map(|entry| match entry {
                    SolvedEntry::Slug(slug) => Some(slug.clone()),
                    SolvedEntry::Record(record) => record.title_slug.clone(),
                })
                .collect(),
            Some(SolvedList::Count(_)) | None => Vec::new(),
        }
    }
}

// -- Serde types for /problems --

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResponse {
    #[serde(default, alias = "problemsetQuestionList")]
    pub problems: Vec<CatalogProblem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProblem {
    pub title_slug: Option<String>,
    #[serde(default)]
    pub topic_tags: Vec<TopicTag>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TopicTag {
    Named { name: String },
    Plain(String),
}

impl TopicTag {
    pub fn name(&self) -> &str {
        match self {
            TopicTag::Named { name } => name,
            TopicTag::Plain(name) => name,
        }
    }
}
