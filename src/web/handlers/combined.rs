// GET /api/platform/combined?leetcode={username}&codeforces={handle}
//
// Either query parameter may be omitted, but not both.

use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;

use crate::web::{api_error, api_success, AppState};

#[derive(Deserialize, Default)]
pub struct CombinedQuery {
    pub leetcode: Option<String>,
    pub codeforces: Option<String>,
}

pub async fn get_combined(
    State(state): State<AppState>,
    Query(params): Query<CombinedQuery>,
) -> Response {
    match state
        .service
        .combine(params.leetcode.as_deref(), params.codeforces.as_deref())
        .await
    {
        Ok(report) => api_success(report),
        Err(e) => {
            tracing::warn!(error = %e, "Combined analytics request failed");
            api_error(&e)
        }
    }
}
