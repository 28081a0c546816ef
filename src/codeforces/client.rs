// HTTP client for the public Codeforces API.
//
// Every method returns the same envelope: `{"status": "OK", "result": ...}`
// on success, `{"status": "FAILED", "comment": "..."}` otherwise. Unknown
// handles come back as HTTP 400 with a FAILED envelope, so the body is
// parsed regardless of the HTTP status and the envelope decides.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Default Codeforces API endpoint.
pub const DEFAULT_CODEFORCES_API_URL: &str = "https://codeforces.com/api";

/// Status value the API uses for a successful call.
const STATUS_OK: &str = "OK";

/// Verdict of an accepted submission.
pub const VERDICT_ACCEPTED: &str = "OK";

/// Read access to the three Codeforces feeds the analytics builder needs.
///
/// Each method yields the unwrapped `result` payload. A FAILED envelope,
/// a transport error or an unparseable body are all errors.
#[async_trait]
pub trait CodeforcesFeed: Send + Sync {
    /// `user.info`: the profile record for one handle.
    async fn user_info(&self, handle: &str) -> Result<UserInfo>;

    /// `user.rating`: contest rating changes in chronological order.
    async fn rating_history(&self, handle: &str) -> Result<Vec<RatingChange>>;

    /// `user.status`: all submissions, newest first.
    async fn submissions(&self, handle: &str) -> Result<Vec<Submission>>;
}

/// Thin reqwest wrapper over the Codeforces API.
pub struct CodeforcesClient {
    client: reqwest::Client,
    base_url: String,
}

impl CodeforcesClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("codetally/0.1 (profile-analytics)")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Call an API method and unwrap its envelope.
    async fn call<T: DeserializeOwned>(&self, method: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, method);

        debug!(method = method, "Codeforces API request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("Codeforces request failed: {method}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read Codeforces {method} response"))?;

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)
            .with_context(|| format!("Codeforces {method} returned {status} with an unexpected body"))?;

        envelope.into_result(method)
    }
}

#[async_trait]
impl CodeforcesFeed for CodeforcesClient {
    async fn user_info(&self, handle: &str) -> Result<UserInfo> {
        let users: Vec<UserInfo> = self.call("user.info", &[("handles", handle)]).await?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("user.info returned no record for {handle}"))
    }

    async fn rating_history(&self, handle: &str) -> Result<Vec<RatingChange>> {
        self.call("user.rating", &[("handle", handle)]).await
    }

    async fn submissions(&self, handle: &str) -> Result<Vec<Submission>> {
        self.call("user.status", &[("handle", handle)]).await
    }
}

// -- Serde types for the API envelope --

/// The `{status, comment, result}` wrapper around every response.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: String,
    pub comment: Option<String>,
    pub result: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap `result` if the status is OK, otherwise fail with the comment.
    pub fn into_result(self, method: &str) -> Result<T> {
        if self.status != STATUS_OK {
            let comment = self.comment.unwrap_or_else(|| "no comment".to_string());
            anyhow::bail!("Codeforces {method} returned {}: {comment}", self.status);
        }
        self.result
            .ok_or_else(|| anyhow::anyhow!("Codeforces {method} returned OK without a result"))
    }
}

// -- Serde types for user.info / user.rating / user.status --

/// A `User` object from `user.info`. Unrated users carry no rating fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub handle: String,
    pub rating: Option<i64>,
    pub max_rating: Option<i64>,
    pub rank: Option<String>,
    pub max_rank: Option<String>,
}

/// A `RatingChange` object from `user.rating`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChange {
    pub contest_id: Option<i64>,
    pub contest_name: String,
    pub rank: i64,
    pub old_rating: i64,
    pub new_rating: i64,
    pub rating_update_time_seconds: Option<i64>,
}

/// A `Submission` object from `user.status`. Verdict is absent while judging.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Option<i64>,
    pub creation_time_seconds: i64,
    pub verdict: Option<String>,
    pub problem: Problem,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        self.verdict.as_deref() == Some(VERDICT_ACCEPTED)
    }
}

/// A `Problem` object. Gym and problemset-only problems may lack a contest id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub contest_id: Option<i64>,
    pub problemset_name: Option<String>,
    pub index: String,
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub rating: Option<i64>,
}

/// Identity of a problem: (contest id or problemset name, index in set).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProblemKey {
    pub set: String,
    pub index: String,
}

impl Problem {
    pub fn key(&self) -> ProblemKey {
        let set = match (self.contest_id, &self.problemset_name) {
            (Some(id), _) => id.to_string(),
            (None, Some(name)) => name.clone(),
            (None, None) => String::new(),
        };
        ProblemKey {
            set,
            index: self.index.clone(),
        }
    }
}
