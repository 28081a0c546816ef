// Per-platform outcomes and the decision table that combines them.
//
//   leetcode   codeforces   result
//   Ready      Ready        both present
//   Ready      Failed/Skip  leetcode only
//   Failed/Skip Ready       codeforces only
//   otherwise               BothPlatformsFailed (with each branch's reason)

use crate::analytics::models::PlatformAnalytics;
use crate::error::AnalyticsError;

/// How one platform branch of a combined request ended.
#[derive(Debug)]
pub enum PlatformOutcome {
    /// No identifier was supplied for this platform.
    Skipped,
    Ready(PlatformAnalytics),
    Failed(AnalyticsError),
}

impl PlatformOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, PlatformOutcome::Ready(_))
    }

    /// Failure reason for the aggregate error, if the branch ran and failed.
    fn failure_reason(&self) -> Option<String> {
        match self {
            PlatformOutcome::Failed(e) => Some(e.to_string()),
            PlatformOutcome::Skipped | PlatformOutcome::Ready(_) => None,
        }
    }

    fn into_analytics(self) -> Option<PlatformAnalytics> {
        match self {
            PlatformOutcome::Ready(analytics) => Some(analytics),
            PlatformOutcome::Skipped | PlatformOutcome::Failed(_) => None,
        }
    }
}

impl From<Result<PlatformAnalytics, AnalyticsError>> for PlatformOutcome {
    fn from(result: Result<PlatformAnalytics, AnalyticsError>) -> Self {
        match result {
            Ok(analytics) => PlatformOutcome::Ready(analytics),
            Err(e) => PlatformOutcome::Failed(e),
        }
    }
}

/// Resolve the two branch outcomes into the platforms the report covers.
///
/// Any single success is enough; a failed or skipped branch just becomes
/// absent. With no success at all the request fails as a whole.
pub fn resolve_outcomes(
    leetcode: PlatformOutcome,
    codeforces: PlatformOutcome,
) -> Result<(Option<PlatformAnalytics>, Option<PlatformAnalytics>), AnalyticsError> {
    if !leetcode.is_ready() && !codeforces.is_ready() {
        return Err(AnalyticsError::BothPlatformsFailed {
            leetcode: leetcode.failure_reason(),
            codeforces: codeforces.failure_reason(),
        });
    }
    Ok((leetcode.into_analytics(), codeforces.into_analytics()))
}
