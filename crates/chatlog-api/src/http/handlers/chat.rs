//! POST /chat - Run one chat turn.
//!
//! Stores the user message, generates a reply (external provider when
//! configured, local rules otherwise), stores it, and returns it.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use chatlog_types::chat::{AttachmentRef, ChatReply};
use chatlog_types::id::RecordId;

use crate::http::error::AppError;
use crate::http::handlers::{begin, elapsed_ms};
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for a chat turn.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub attachments: Vec<ChatAttachment>,
}

/// Reference to a previously uploaded attachment.
#[derive(Debug, Deserialize)]
pub struct ChatAttachment {
    pub id: String,
    #[serde(default)]
    pub filename: String,
}

impl ChatAttachment {
    fn into_ref(self) -> Result<AttachmentRef, AppError> {
        Ok(AttachmentRef {
            id: RecordId::parse(&self.id)?,
            filename: self.filename,
        })
    }
}

/// POST /chat - Run one chat turn.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<ApiResponse<ChatReply>, AppError> {
    let (request_id, start) = begin();

    let attachments = request
        .attachments
        .into_iter()
        .map(ChatAttachment::into_ref)
        .collect::<Result<Vec<_>, _>>()?;

    let reply = state
        .chat_service
        .chat(&request.message, request.conversation_id.as_deref(), attachments)
        .await?;

    let link = format!("/messages?conversation_id={}", reply.conversation_id);
    Ok(ApiResponse::success(reply, request_id, elapsed_ms(start)).with_link("messages", &link))
}
