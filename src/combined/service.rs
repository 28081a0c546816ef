// AnalyticsService: owns the platform clients and the catalog cache.
//
// One service is built per process and shared (via Arc) across requests.
// Each request is otherwise independent: nothing but the catalog cache is
// written while a request runs.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use crate::analytics::models::PlatformAnalytics;
use crate::codeforces::client::{CodeforcesClient, CodeforcesFeed};
use crate::combined::outcome::{resolve_outcomes, PlatformOutcome};
use crate::combined::report::{self, UnifiedReport};
use crate::config::Config;
use crate::error::AnalyticsError;
use crate::leetcode::catalog::{CatalogSource, ProblemCatalogCache};
use crate::leetcode::client::{LeetCodeClient, LeetCodeFeed};
use crate::{codeforces, leetcode};

pub struct AnalyticsService {
    pub leetcode_feed: Arc<dyn LeetCodeFeed>,
    pub catalog_source: Arc<dyn CatalogSource>,
    pub codeforces_feed: Arc<dyn CodeforcesFeed>,
    pub catalog: Arc<ProblemCatalogCache>,
    /// How many topics `summary.topSkills` lists.
    pub top_skills: usize,
}

impl AnalyticsService {
    /// Build the HTTP clients and catalog cache described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let leetcode = Arc::new(LeetCodeClient::new(
            &config.leetcode_api_url,
            config.http_timeout,
            config.catalog_timeout,
        )?);
        let codeforces = Arc::new(CodeforcesClient::new(
            &config.codeforces_api_url,
            config.http_timeout,
        )?);

        Ok(Self {
            leetcode_feed: leetcode.clone(),
            catalog_source: leetcode,
            codeforces_feed: codeforces,
            catalog: Arc::new(ProblemCatalogCache::new(config.catalog_ttl)),
            top_skills: config.top_skills,
        })
    }

    /// LeetCode analytics for one username.
    pub async fn leetcode(&self, username: &str) -> Result<PlatformAnalytics, AnalyticsError> {
        leetcode::analytics::fetch_analytics(
            self.leetcode_feed.as_ref(),
            self.catalog_source.as_ref(),
            &self.catalog,
            username,
        )
        .await
    }

    /// Codeforces analytics for one handle.
    pub async fn codeforces(&self, handle: &str) -> Result<PlatformAnalytics, AnalyticsError> {
        codeforces::analytics::fetch_analytics(self.codeforces_feed.as_ref(), handle).await
    }

    /// Build the combined report for the supplied identifiers.
    ///
    /// At least one identifier must be non-blank. Both platforms are fetched
    /// concurrently and both are awaited; a single failure only drops that
    /// platform from the report.
    pub async fn combine(
        &self,
        leetcode: Option<&str>,
        codeforces: Option<&str>,
    ) -> Result<UnifiedReport, AnalyticsError> {
        let leetcode = non_blank(leetcode);
        let codeforces = non_blank(codeforces);

        if leetcode.is_none() && codeforces.is_none() {
            return Err(AnalyticsError::InvalidRequest(
                "At least one platform username/handle is required (leetcode or codeforces)"
                    .to_string(),
            ));
        }

        info!(
            leetcode = leetcode.unwrap_or("-"),
            codeforces = codeforces.unwrap_or("-"),
            "Building combined analytics"
        );

        let leetcode_branch = async {
            match leetcode {
                Some(username) => PlatformOutcome::from(self.leetcode(username).await),
                None => PlatformOutcome::Skipped,
            }
        };
        let codeforces_branch = async {
            match codeforces {
                Some(handle) => PlatformOutcome::from(self.codeforces(handle).await),
                None => PlatformOutcome::Skipped,
            }
        };

        let (leetcode_outcome, codeforces_outcome) =
            futures::future::join(leetcode_branch, codeforces_branch).await;

        if let PlatformOutcome::Failed(e) = &leetcode_outcome {
            warn!(error = %e, "LeetCode fetch failed");
        }
        if let PlatformOutcome::Failed(e) = &codeforces_outcome {
            warn!(error = %e, "Codeforces fetch failed");
        }

        let (leetcode, codeforces) = resolve_outcomes(leetcode_outcome, codeforces_outcome)?;
        let report = report::compose(leetcode, codeforces, self.top_skills, Utc::now())?;

        info!(
            platforms = report.summary.platforms_covered.len(),
            combined_total = report.combined_metrics.combined_total,
            calendar_days = report.activity_calendar.len(),
            "Combined report built"
        );

        Ok(report)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
