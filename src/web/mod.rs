// Web server: Axum JSON API over the analytics service.
//
// Routes mirror the CLI subcommands:
//   GET /api/platform/combined?leetcode=&codeforces=
//   GET /api/platform/leetcode/{username}
//   GET /api/platform/codeforces/{handle}
//   GET /health
//
// Every API response is `{success: true, data}` or `{success: false,
// message}`; internal errors never leak past the message string.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::combined::AnalyticsService;
use crate::error::AnalyticsError;
use crate::output::envelope::{ApiFailure, ApiSuccess};

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalyticsService>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(service: AnalyticsService, port: u16, bind: &str) -> Result<()> {
    let state = AppState {
        service: Arc::new(service),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("codetally API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/api/platform/combined",
            get(handlers::combined::get_combined),
        )
        .route(
            "/api/platform/leetcode/{username}",
            get(handlers::platform::get_leetcode),
        )
        .route(
            "/api/platform/codeforces/{handle}",
            get(handlers::platform::get_codeforces),
        );

    Router::new()
        .merge(api)
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// `{success: true, data}` with 200.
pub fn api_success<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiSuccess::new(data))).into_response()
}

/// `{success: false, message}` with the status matching the error kind.
pub fn api_error(err: &AnalyticsError) -> Response {
    (status_for(err), Json(ApiFailure::new(err.to_string()))).into_response()
}

fn status_for(err: &AnalyticsError) -> StatusCode {
    match err {
        AnalyticsError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        AnalyticsError::NotFound { .. } => StatusCode::NOT_FOUND,
        AnalyticsError::BothPlatformsFailed { .. } | AnalyticsError::InvalidCalendarKey { .. } => {
            StatusCode::BAD_GATEWAY
        }
    }
}
