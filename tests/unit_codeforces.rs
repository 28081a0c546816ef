// Unit tests for the Codeforces analytics builder and API envelope.
//
// Covers solved-set deduplication, the calendar/topic asymmetry on
// resubmissions, contest slicing and the profile short-circuit. Everything
// runs against fake feeds with no network access.

mod common;

use std::sync::atomic::Ordering;

use chrono::{NaiveDate, Utc};

use codetally::analytics::models::Platform;
use codetally::codeforces::analytics::{
    build_analytics, fetch_analytics, summarize_submissions, MAX_TOPICS,
};
use codetally::codeforces::client::{ApiEnvelope, Submission, UserInfo};
use codetally::error::AnalyticsError;

use common::{cf_rating_change, cf_submission, cf_user, FakeCodeforces};

// 2025-10-07T10:00:00Z and 2025-10-09T10:00:00Z
const OCT_7: i64 = 1_759_831_200;
const OCT_9: i64 = 1_760_004_000;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================
// summarize_submissions: dedup and asymmetry
// ============================================================

#[test]
fn resubmission_counts_once_for_solves_and_topics_but_twice_for_calendar() {
    let subs = vec![
        cf_submission(1520, "A", "OK", OCT_9, &["dp", "greedy"]),
        cf_submission(1520, "A", "OK", OCT_7, &["dp", "greedy"]),
    ];

    let summary = summarize_submissions(&subs);

    assert_eq!(summary.solved.len(), 1);
    assert_eq!(summary.topics.get("dp"), Some(1));
    assert_eq!(summary.topics.get("greedy"), Some(1));
    assert_eq!(summary.calendar.get(date(2025, 10, 7)), Some(1));
    assert_eq!(summary.calendar.get(date(2025, 10, 9)), Some(1));
}

#[test]
fn same_day_accepted_submissions_accumulate() {
    let subs = vec![
        cf_submission(1, "A", "OK", OCT_7, &[]),
        cf_submission(1, "B", "OK", OCT_7 + 60, &[]),
        cf_submission(1, "B", "OK", OCT_7 + 120, &[]),
    ];

    let summary = summarize_submissions(&subs);

    assert_eq!(summary.solved.len(), 2);
    assert_eq!(summary.calendar.get(date(2025, 10, 7)), Some(3));
}

#[test]
fn non_accepted_verdicts_contribute_nothing() {
    let subs = vec![
        cf_submission(1, "A", "WRONG_ANSWER", OCT_7, &["math"]),
        cf_submission(1, "A", "TIME_LIMIT_EXCEEDED", OCT_7, &["math"]),
        cf_submission(1, "B", "COMPILATION_ERROR", OCT_9, &["math"]),
    ];

    let summary = summarize_submissions(&subs);

    assert!(summary.solved.is_empty());
    assert!(summary.topics.is_empty());
    assert!(summary.calendar.is_empty());
}

#[test]
fn pending_submission_without_verdict_is_ignored() {
    let sub: Submission = serde_json::from_value(serde_json::json!({
        "creationTimeSeconds": OCT_7,
        "problem": {"contestId": 5, "index": "C", "tags": ["graphs"]}
    }))
    .unwrap();

    let summary = summarize_submissions(&[sub]);
    assert!(summary.solved.is_empty());
}

#[test]
fn same_index_in_different_contests_are_different_problems() {
    let subs = vec![
        cf_submission(100, "A", "OK", OCT_7, &["math"]),
        cf_submission(200, "A", "OK", OCT_7, &["math"]),
    ];

    let summary = summarize_submissions(&subs);
    assert_eq!(summary.solved.len(), 2);
    assert_eq!(summary.topics.get("math"), Some(2));
}

#[test]
fn out_of_range_timestamp_still_counts_as_solve() {
    let subs = vec![
        cf_submission(300, "C", "OK", i64::MAX, &["geometry"]),
        cf_submission(300, "D", "OK", OCT_7, &["math"]),
    ];

    let summary = summarize_submissions(&subs);

    assert_eq!(summary.solved.len(), 2);
    assert_eq!(summary.topics.get("geometry"), Some(1));
    assert_eq!(summary.calendar.len(), 1);
    assert_eq!(summary.calendar.total(), 1);
}

#[test]
fn problemset_problem_without_contest_id_is_keyed_by_set_name() {
    let make = |set: &str| -> Submission {
        serde_json::from_value(serde_json::json!({
            "creationTimeSeconds": OCT_7,
            "verdict": "OK",
            "problem": {"problemsetName": set, "index": "A", "tags": []}
        }))
        .unwrap()
    };

    let summary = summarize_submissions(&[make("acmsguru"), make("acmsguru"), make("other")]);
    assert_eq!(summary.solved.len(), 2);
}

#[test]
fn topic_table_is_sorted_and_capped() {
    let mut subs = Vec::new();
    for i in 0..(MAX_TOPICS as i64 + 50) {
        let tag = format!("tag-{i:03}");
        subs.push(cf_submission(i, "A", "OK", OCT_7, &[tag.as_str(), "common"]));
    }

    let user = cf_user("tester", None);
    let analytics = build_analytics("tester", &user, &[], &subs, Utc::now());

    assert_eq!(analytics.topics.len(), MAX_TOPICS);
    assert_eq!(analytics.topics.iter().next(), Some(("common", MAX_TOPICS as u64 + 50)));
}

// ============================================================
// build_analytics: profile and contest summary
// ============================================================

#[test]
fn contest_summary_keeps_last_five_in_feed_order() {
    let history: Vec<_> = (1..=7).map(cf_rating_change).collect();
    let user = cf_user("tester", Some(1470));

    let analytics = build_analytics("tester", &user, &history, &[], Utc::now());

    assert_eq!(analytics.contest.attended_contests, 7);
    assert_eq!(analytics.contest.rating, Some(1470));
    assert_eq!(analytics.contest.global_ranking, None);
    let names: Vec<&str> = analytics
        .contest
        .recent_contests
        .iter()
        .map(|c| c.contest_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Codeforces Round 3",
            "Codeforces Round 4",
            "Codeforces Round 5",
            "Codeforces Round 6",
            "Codeforces Round 7",
        ]
    );
    assert_eq!(analytics.contest.recent_contests[4].new_rating, 1470);
}

#[test]
fn short_history_is_kept_whole() {
    let history: Vec<_> = (1..=2).map(cf_rating_change).collect();
    let user = cf_user("tester", Some(1420));
    let analytics = build_analytics("tester", &user, &history, &[], Utc::now());
    assert_eq!(analytics.contest.recent_contests.len(), 2);
}

#[test]
fn unrated_user_gets_unrated_rank_profile() {
    let user = cf_user("newbie42", None);
    let analytics = build_analytics("newbie42", &user, &[], &[], Utc::now());

    let profile = analytics.rank_profile().unwrap();
    assert_eq!(profile.rating, None);
    assert_eq!(profile.rank, "unrated");
    assert_eq!(profile.max_rank, "unrated");
    assert_eq!(analytics.platform, Platform::Codeforces);
    assert!(analytics.success);
}

#[test]
fn calendar_is_date_keyed() {
    let subs = vec![cf_submission(1, "A", "OK", OCT_7, &[])];
    let user = cf_user("tester", None);
    let analytics = build_analytics("tester", &user, &[], &subs, Utc::now());

    assert_eq!(analytics.calendar.get("2025-10-07"), Some(&1));
}

// ============================================================
// fetch_analytics: failure handling
// ============================================================

#[tokio::test]
async fn unknown_handle_short_circuits() {
    let feed = FakeCodeforces {
        user: None,
        rating: Some(vec![cf_rating_change(1)]),
        submissions: Some(vec![]),
        ..Default::default()
    };

    let err = fetch_analytics(&feed, "no_such_handle").await.unwrap_err();

    assert!(matches!(
        err,
        AnalyticsError::NotFound { platform: Platform::Codeforces, ref identifier, .. }
            if identifier == "no_such_handle"
    ));
    assert_eq!(feed.user_calls.load(Ordering::SeqCst), 1);
    assert_eq!(feed.secondary_calls(), 0, "no further fetches after profile failure");
}

#[tokio::test]
async fn rating_failure_degrades_to_empty_contest() {
    let feed = FakeCodeforces {
        user: Some(cf_user("tester", Some(1500))),
        rating: None,
        submissions: Some(vec![cf_submission(1, "A", "OK", OCT_7, &["dp"])]),
        ..Default::default()
    };

    let analytics = fetch_analytics(&feed, "tester").await.unwrap();

    assert_eq!(analytics.total_solved, 1);
    assert_eq!(analytics.contest.attended_contests, 0);
    assert!(analytics.contest.recent_contests.is_empty());
}

#[tokio::test]
async fn submission_failure_degrades_to_empty_solves() {
    let feed = FakeCodeforces {
        user: Some(cf_user("tester", Some(1500))),
        rating: Some(vec![cf_rating_change(1)]),
        submissions: None,
        ..Default::default()
    };

    let analytics = fetch_analytics(&feed, "tester").await.unwrap();

    assert_eq!(analytics.total_solved, 0);
    assert!(analytics.calendar.is_empty());
    assert!(analytics.topics.is_empty());
    assert_eq!(analytics.contest.attended_contests, 1);
}

#[tokio::test]
async fn blank_handle_is_rejected_before_fetching() {
    let feed = FakeCodeforces::default();
    let err = fetch_analytics(&feed, "   ").await.unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidRequest(_)));
    assert_eq!(feed.user_calls.load(Ordering::SeqCst), 0);
}

// ============================================================
// API envelope
// ============================================================

#[test]
fn failed_envelope_surfaces_comment() {
    let json = r#"{"status":"FAILED","comment":"handles: User with handle zz not found"}"#;
    let envelope: ApiEnvelope<Vec<UserInfo>> = serde_json::from_str(json).unwrap();
    let err = envelope.into_result("user.info").unwrap_err();
    assert!(err.to_string().contains("User with handle zz not found"));
}

#[test]
fn ok_envelope_yields_result() {
    let json = r#"{"status":"OK","result":[{"handle":"tourist","rating":3800,"maxRating":4009,"rank":"legendary grandmaster","maxRank":"tourist"}]}"#;
    let envelope: ApiEnvelope<Vec<UserInfo>> = serde_json::from_str(json).unwrap();
    let users = envelope.into_result("user.info").unwrap();
    assert_eq!(users[0].handle, "tourist");
    assert_eq!(users[0].rating, Some(3800));
}
