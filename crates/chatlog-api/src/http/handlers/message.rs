//! GET /messages?conversation_id= - Messages of a conversation in creation order.

use axum::extract::{Query, State};
use serde::Deserialize;

use chatlog_types::chat::MessageView;

use crate::http::error::AppError;
use crate::http::handlers::{begin, elapsed_ms};
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageListQuery {
    #[serde(default)]
    pub conversation_id: String,
}

pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<MessageListQuery>,
) -> Result<ApiResponse<Vec<MessageView>>, AppError> {
    let (request_id, start) = begin();
    let messages = state
        .chat_service
        .list_messages(&query.conversation_id)
        .await?;
    Ok(ApiResponse::success(messages, request_id, elapsed_ms(start)))
}
