//! Conversation and message types for Chatlog.
//!
//! A conversation is created once (explicitly or by its first chat turn) and
//! never updated. Each chat turn appends two immutable messages: the user's
//! message followed by the assistant's reply.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::id::RecordId;
use crate::timestamp;

/// Title used when no usable title is supplied.
pub const DEFAULT_TITLE: &str = "New Chat";

/// Maximum number of characters taken from the first message for an implicit title.
pub const TITLE_MAX_CHARS: usize = 40;

/// Author of a stored message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'assistant'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A stored conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: RecordId,
    pub title: String,
    /// Store-assigned creation time; `None` when the stored value is missing or unreadable.
    pub created_at: Option<DateTime<Utc>>,
}

/// Reference from a message to an uploaded attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub id: RecordId,
    pub filename: String,
}

/// A message to be inserted; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub conversation_id: RecordId,
    pub role: Role,
    pub content: String,
    pub attachments: Vec<AttachmentRef>,
}

/// A stored message within a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: RecordId,
    pub conversation_id: RecordId,
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Conversation as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationView {
    pub id: String,
    pub title: String,
    pub created_at: Option<String>,
}

impl From<&Conversation> for ConversationView {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.to_string(),
            title: conversation.title.clone(),
            created_at: timestamp::to_iso(conversation.created_at.as_ref()),
        }
    }
}

/// Message as returned to clients, with the timestamp normalized to text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageView {
    pub id: String,
    pub conversation_id: String,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentRef>,
    pub created_at: Option<String>,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            conversation_id: message.conversation_id.to_string(),
            role: message.role,
            content: message.content.clone(),
            attachments: message.attachments.clone(),
            created_at: timestamp::to_iso(message.created_at.as_ref()),
        }
    }
}

/// Result of one chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub conversation_id: String,
    pub reply: MessageView,
}

/// Title for a conversation created implicitly by its first message.
pub fn title_from_message(text: &str) -> String {
    let title: String = text.trim().chars().take(TITLE_MAX_CHARS).collect();
    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::User, Role::Assistant] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
        assert!("system".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_title_from_message() {
        assert_eq!(title_from_message("  hello there  "), "hello there");
        assert_eq!(title_from_message("   "), DEFAULT_TITLE);

        let long = "a".repeat(100);
        assert_eq!(title_from_message(&long).chars().count(), TITLE_MAX_CHARS);

        // Multi-byte characters are counted as characters, not bytes.
        let accented = "é".repeat(50);
        assert_eq!(title_from_message(&accented), "é".repeat(40));
    }

    #[test]
    fn test_message_view_normalizes_missing_timestamp() {
        let message = Message {
            id: RecordId::new(),
            conversation_id: RecordId::new(),
            role: Role::User,
            content: "hi".to_string(),
            attachments: Vec::new(),
            created_at: None,
        };
        let view = MessageView::from(&message);
        assert_eq!(view.created_at, None);
        assert_eq!(view.conversation_id, message.conversation_id.to_string());

        let json = serde_json::to_value(&view).unwrap();
        assert!(json["created_at"].is_null());
        assert!(json.get("attachments").is_none());
    }
}
