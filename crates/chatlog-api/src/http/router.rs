//! Axum router configuration with middleware.
//!
//! Middleware: permissive CORS, request tracing, and a body limit on uploads
//! sized to the largest accepted attachment.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use chatlog_types::attachment::MAX_ATTACHMENT_BYTES;

use crate::http::handlers;
use crate::state::AppState;

/// Room for multipart boundaries and the text fields next to the file.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::status::root))
        .route("/health", get(handlers::status::health))
        .route("/status", get(handlers::status::status))
        .route(
            "/conversations",
            get(handlers::conversation::list_conversations)
                .post(handlers::conversation::create_conversation),
        )
        .route("/messages", get(handlers::message::list_messages))
        .route("/chat", post(handlers::chat::chat))
        .route(
            "/attachments",
            post(handlers::attachment::upload_attachment).layer(DefaultBodyLimit::max(
                MAX_ATTACHMENT_BYTES + MULTIPART_OVERHEAD_BYTES,
            )),
        )
        .route(
            "/attachments/{id}",
            get(handlers::attachment::download_attachment),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
