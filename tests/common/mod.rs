// Shared fakes for the integration tests.
//
// Each fake feed returns canned payloads (or fails when a payload is None)
// and counts how often it was called, so tests can assert on short-circuit
// behavior as well as on output.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use codetally::codeforces::client::{CodeforcesFeed, RatingChange, Submission, UserInfo};
use codetally::combined::AnalyticsService;
use codetally::leetcode::catalog::{CatalogSource, Clock, ProblemCatalogCache};
use codetally::leetcode::client::{
    CalendarResponse, CatalogProblem, ContestResponse, LeetCodeFeed, ProfileStats, SolvedResponse,
};

// ============================================================
// Codeforces
// ============================================================

#[derive(Default)]
pub struct FakeCodeforces {
    pub user: Option<UserInfo>,
    pub rating: Option<Vec<RatingChange>>,
    pub submissions: Option<Vec<Submission>>,
    pub user_calls: AtomicUsize,
    pub rating_calls: AtomicUsize,
    pub submission_calls: AtomicUsize,
}

impl FakeCodeforces {
    pub fn secondary_calls(&self) -> usize {
        self.rating_calls.load(Ordering::SeqCst) + self.submission_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CodeforcesFeed for FakeCodeforces {
    async fn user_info(&self, handle: &str) -> Result<UserInfo> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.user.clone().ok_or_else(|| {
            anyhow::anyhow!("Codeforces user.info returned FAILED: handles: User with handle {handle} not found")
        })
    }

    async fn rating_history(&self, _handle: &str) -> Result<Vec<RatingChange>> {
        self.rating_calls.fetch_add(1, Ordering::SeqCst);
        self.rating
            .clone()
            .ok_or_else(|| anyhow::anyhow!("user.rating unavailable"))
    }

    async fn submissions(&self, _handle: &str) -> Result<Vec<Submission>> {
        self.submission_calls.fetch_add(1, Ordering::SeqCst);
        self.submissions
            .clone()
            .ok_or_else(|| anyhow::anyhow!("user.status unavailable"))
    }
}

pub fn cf_user(handle: &str, rating: Option<i64>) -> UserInfo {
    let mut value = json!({ "handle": handle });
    if let Some(r) = rating {
        value["rating"] = json!(r);
        value["maxRating"] = json!(r + 100);
        value["rank"] = json!("expert");
        value["maxRank"] = json!("candidate master");
    }
    serde_json::from_value(value).unwrap()
}

pub fn cf_submission(
    contest_id: i64,
    index: &str,
    verdict: &str,
    created: i64,
    tags: &[&str],
) -> Submission {
    serde_json::from_value(json!({
        "id": created,
        "creationTimeSeconds": created,
        "verdict": verdict,
        "problem": {
            "contestId": contest_id,
            "index": index,
            "name": format!("Problem {contest_id}{index}"),
            "tags": tags,
        }
    }))
    .unwrap()
}

pub fn cf_rating_change(n: i64) -> RatingChange {
    serde_json::from_value(json!({
        "contestId": 1000 + n,
        "contestName": format!("Codeforces Round {n}"),
        "handle": "tester",
        "rank": 100 * n,
        "ratingUpdateTimeSeconds": 1_700_000_000 + n * 86_400,
        "oldRating": 1400 + 10 * (n - 1),
        "newRating": 1400 + 10 * n,
    }))
    .unwrap()
}

// ============================================================
// LeetCode
// ============================================================

#[derive(Default)]
pub struct FakeLeetCode {
    pub stats: Option<ProfileStats>,
    pub calendar: Option<CalendarResponse>,
    pub contest: Option<ContestResponse>,
    pub solved: Option<SolvedResponse>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl LeetCodeFeed for FakeLeetCode {
    async fn profile_stats(&self, username: &str) -> Result<ProfileStats> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.stats
            .clone()
            .ok_or_else(|| anyhow::anyhow!("LeetCode /{username} returned 404 Not Found"))
    }

    async fn calendar(&self, _username: &str) -> Result<CalendarResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.calendar
            .clone()
            .ok_or_else(|| anyhow::anyhow!("calendar timed out"))
    }

    async fn contest(&self, _username: &str) -> Result<ContestResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.contest
            .clone()
            .ok_or_else(|| anyhow::anyhow!("contest timed out"))
    }

    async fn solved(&self, _username: &str) -> Result<SolvedResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.solved
            .clone()
            .ok_or_else(|| anyhow::anyhow!("solved list timed out"))
    }
}

pub fn lc_stats(username: &str, easy: u64, medium: u64, hard: u64) -> ProfileStats {
    serde_json::from_value(json!({
        "username": username,
        "totalSolved": easy + medium + hard,
        "easySolved": easy,
        "mediumSolved": medium,
        "hardSolved": hard,
    }))
    .unwrap()
}

pub fn lc_calendar(entries: &[(&str, u64)]) -> CalendarResponse {
    let map: serde_json::Map<String, serde_json::Value> = entries
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect();
    // The mirror sends the calendar as a JSON-encoded string
    serde_json::from_value(json!({
        "submissionCalendar": serde_json::Value::Object(map).to_string()
    }))
    .unwrap()
}

pub fn lc_solved(slugs: &[&str]) -> SolvedResponse {
    serde_json::from_value(json!({ "solvedProblem": slugs })).unwrap()
}

pub fn lc_contest(rating: f64, ranking: i64, attended: u64) -> ContestResponse {
    serde_json::from_value(json!({
        "rating": rating,
        "ranking": ranking,
        "attendedContestsCount": attended,
    }))
    .unwrap()
}

// ============================================================
// Catalog and clock
// ============================================================

#[derive(Default)]
pub struct FakeCatalog {
    pub problems: Option<Vec<CatalogProblem>>,
    pub fetches: AtomicUsize,
}

impl FakeCatalog {
    pub fn with(problems: &[(&str, &[&str])]) -> Self {
        Self {
            problems: Some(catalog_problems(problems)),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogProblem>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.problems
            .clone()
            .ok_or_else(|| anyhow::anyhow!("LeetCode /problems returned 503 Service Unavailable"))
    }
}

pub fn catalog_problems(problems: &[(&str, &[&str])]) -> Vec<CatalogProblem> {
    problems
        .iter()
        .map(|(slug, tags)| {
            let tags: Vec<serde_json::Value> = tags
                .iter()
                .map(|t| json!({ "name": t, "slug": t.to_lowercase().replace(' ', "-") }))
                .collect();
            serde_json::from_value(json!({ "titleSlug": slug, "topicTags": tags })).unwrap()
        })
        .collect()
}

/// A clock that only moves when told to.
pub struct FakeClock {
    now: Mutex<DateTime<Utc>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 10, 7, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(by).unwrap();
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// ============================================================
// Service assembly
// ============================================================

pub fn service(
    leetcode: Arc<FakeLeetCode>,
    codeforces: Arc<FakeCodeforces>,
    catalog: Arc<FakeCatalog>,
) -> AnalyticsService {
    AnalyticsService {
        leetcode_feed: leetcode,
        catalog_source: catalog,
        codeforces_feed: codeforces,
        catalog: Arc::new(ProblemCatalogCache::new(Duration::from_secs(24 * 3600))),
        top_skills: 10,
    }
}
