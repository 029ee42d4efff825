//! Conversation HTTP handlers.
//!
//! Endpoints:
//! - POST /conversations - Create a conversation
//! - GET  /conversations - List conversations, most recent first

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use chatlog_types::chat::ConversationView;

use crate::http::error::AppError;
use crate::http::handlers::{begin, elapsed_ms};
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for conversation creation.
#[derive(Debug, Default, Deserialize)]
pub struct CreateConversationRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Creation result.
#[derive(Debug, Serialize)]
pub struct CreatedConversation {
    pub id: String,
    pub title: String,
}

/// POST /conversations - Create a conversation.
///
/// The body is optional; a missing or blank title becomes "New Chat".
pub async fn create_conversation(
    State(state): State<AppState>,
    body: Option<Json<CreateConversationRequest>>,
) -> Result<ApiResponse<CreatedConversation>, AppError> {
    let (request_id, start) = begin();
    let request = body.map(|Json(b)| b).unwrap_or_default();

    let conversation = state
        .chat_service
        .create_conversation(request.title.as_deref())
        .await?;

    let link = format!("/messages?conversation_id={}", conversation.id);
    Ok(ApiResponse::success(
        CreatedConversation {
            id: conversation.id.to_string(),
            title: conversation.title,
        },
        request_id,
        elapsed_ms(start),
    )
    .with_link("messages", &link))
}

/// GET /conversations - List conversations.
pub async fn list_conversations(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<ConversationView>>, AppError> {
    let (request_id, start) = begin();
    let conversations = state.chat_service.list_conversations().await?;
    let views = conversations.iter().map(ConversationView::from).collect();
    Ok(ApiResponse::success(views, request_id, elapsed_ms(start)))
}
