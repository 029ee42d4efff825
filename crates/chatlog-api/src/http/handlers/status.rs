//! Liveness and store diagnostics.
//!
//! Endpoints:
//! - GET /       - Banner
//! - GET /health - Liveness and version
//! - GET /status - Store connectivity diagnostic

use axum::extract::State;
use serde_json::{Value, json};

use crate::http::handlers::{begin, elapsed_ms};
use crate::http::response::ApiResponse;
use crate::state::{AppState, StatusReport};

/// GET / - Banner.
pub async fn root() -> ApiResponse<Value> {
    let (request_id, start) = begin();
    ApiResponse::success(
        json!({ "message": "Chat API is running" }),
        request_id,
        elapsed_ms(start),
    )
}

/// GET /health - Liveness check.
pub async fn health() -> ApiResponse<Value> {
    let (request_id, start) = begin();
    ApiResponse::success(
        json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }),
        request_id,
        elapsed_ms(start),
    )
}

/// GET /status - Store diagnostic. Always 200; failures are reported in the body.
pub async fn status(State(state): State<AppState>) -> ApiResponse<StatusReport> {
    let (request_id, start) = begin();
    let report = state.status_report().await;
    ApiResponse::success(report, request_id, elapsed_ms(start))
}
