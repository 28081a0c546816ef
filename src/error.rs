// Error taxonomy for the analytics pipeline.
//
// Partial fetch failures are not represented here: a secondary feed that
// fails is logged and degrades to its empty default inside the builder.
// Only the outcomes a caller has to react to get a variant.

use thiserror::Error;

use crate::analytics::models::Platform;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// Upstream reports the identifier does not exist, or the primary
    /// profile fetch failed. Builders short-circuit on this.
    #[error("{platform} user '{identifier}' not found: {reason}")]
    NotFound {
        platform: Platform,
        identifier: String,
        reason: String,
    },

    /// The request itself is unusable (no identifier supplied, blank name).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Neither platform produced analytics. Each field carries that branch's
    /// failure reason, or `None` if the branch was never requested.
    #[error("Failed to fetch data from both platforms")]
    BothPlatformsFailed {
        leetcode: Option<String>,
        codeforces: Option<String>,
    },

    /// A calendar key could not be normalized to a calendar date.
    #[error("invalid calendar key '{key}': {reason}")]
    InvalidCalendarKey { key: String, reason: String },
}

impl AnalyticsError {
    pub fn not_found(platform: Platform, identifier: &str, reason: impl Into<String>) -> Self {
        Self::NotFound {
            platform,
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_failed_message_is_aggregate() {
        let err = AnalyticsError::BothPlatformsFailed {
            leetcode: Some("timeout".to_string()),
            codeforces: None,
        };
        assert_eq!(err.to_string(), "Failed to fetch data from both platforms");
    }

    #[test]
    fn not_found_names_platform_and_identifier() {
        let err = AnalyticsError::not_found(Platform::Codeforces, "tourist_", "status FAILED");
        assert_eq!(
            err.to_string(),
            "codeforces user 'tourist_' not found: status FAILED"
        );
    }
}
