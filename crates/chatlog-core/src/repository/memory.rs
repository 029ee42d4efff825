//! In-memory repository used by service tests.

use std::sync::{Arc, Mutex};

use chatlog_types::attachment::{Attachment, NewAttachment};
use chatlog_types::chat::{Conversation, Message, NewMessage};
use chatlog_types::error::RepositoryError;
use chatlog_types::id::RecordId;
use chrono::Utc;

use super::attachment::AttachmentRepository;
use super::conversation::ConversationRepository;
use super::message::MessageRepository;

#[derive(Default)]
struct State {
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
    attachments: Vec<Attachment>,
}

/// Cheaply cloneable handle; every clone sees the same records.
#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn conversation_count(&self) -> usize {
        self.state.lock().unwrap().conversations.len()
    }

    pub(crate) fn message_count(&self) -> usize {
        self.state.lock().unwrap().messages.len()
    }

    /// Insert a conversation whose stored timestamp is missing.
    pub(crate) fn push_untimed_conversation(&self, title: &str) -> RecordId {
        let id = RecordId::new();
        self.state.lock().unwrap().conversations.push(Conversation {
            id,
            title: title.to_string(),
            created_at: None,
        });
        id
    }

    /// Overwrite a stored attachment payload.
    pub(crate) fn corrupt_attachment(&self, id: &RecordId, data: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(attachment) = state.attachments.iter_mut().find(|a| &a.id == id) {
            attachment.data = data.to_string();
        }
    }
}

impl ConversationRepository for MemoryStore {
    async fn insert_conversation(&self, title: &str) -> Result<Conversation, RepositoryError> {
        let conversation = Conversation {
            id: RecordId::new(),
            title: title.to_string(),
            created_at: Some(Utc::now()),
        };
        self.state
            .lock()
            .unwrap()
            .conversations
            .push(conversation.clone());
        Ok(conversation)
    }

    async fn get_conversation(
        &self,
        id: &RecordId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.conversations.iter().find(|c| &c.id == id).cloned())
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepositoryError> {
        Ok(self.state.lock().unwrap().conversations.clone())
    }
}

impl MessageRepository for MemoryStore {
    async fn insert_message(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if !state
            .conversations
            .iter()
            .any(|c| c.id == message.conversation_id)
        {
            return Err(RepositoryError::Conflict(
                "conversation does not exist".to_string(),
            ));
        }
        let stored = Message {
            id: RecordId::new(),
            conversation_id: message.conversation_id,
            role: message.role,
            content: message.content.clone(),
            attachments: message.attachments.clone(),
            created_at: Some(Utc::now()),
        };
        state.messages.push(stored.clone());
        Ok(stored)
    }

    async fn list_messages(
        &self,
        conversation_id: &RecordId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .messages
            .iter()
            .filter(|m| &m.conversation_id == conversation_id)
            .cloned()
            .collect())
    }
}

impl AttachmentRepository for MemoryStore {
    async fn insert_attachment(
        &self,
        attachment: &NewAttachment,
    ) -> Result<Attachment, RepositoryError> {
        let stored = Attachment {
            id: RecordId::new(),
            conversation_id: attachment.conversation_id,
            message_id: attachment.message_id,
            filename: attachment.filename.clone(),
            content_type: attachment.content_type.clone(),
            size_bytes: attachment.size_bytes,
            data: attachment.data.clone(),
            created_at: Some(Utc::now()),
        };
        self.state.lock().unwrap().attachments.push(stored.clone());
        Ok(stored)
    }

    async fn get_attachment(&self, id: &RecordId) -> Result<Option<Attachment>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.attachments.iter().find(|a| &a.id == id).cloned())
    }
}
