// Single-platform analytics handlers.
//
// GET /api/platform/leetcode/{username}
// GET /api/platform/codeforces/{handle}

use axum::extract::{Path, State};
use axum::response::Response;

use crate::web::{api_error, api_success, AppState};

pub async fn get_leetcode(State(state): State<AppState>, Path(username): Path<String>) -> Response {
    match state.service.leetcode(&username).await {
        Ok(analytics) => api_success(analytics),
        Err(e) => api_error(&e),
    }
}

pub async fn get_codeforces(State(state): State<AppState>, Path(handle): Path<String>) -> Response {
    match state.service.codeforces(&handle).await {
        Ok(analytics) => api_success(analytics),
        Err(e) => api_error(&e),
    }
}
