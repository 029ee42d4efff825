//! Chat service orchestrating conversations, messages, and attachments.
//!
//! ChatService coordinates the conversation, message, and attachment
//! repositories with the ReplyGenerator. Identifiers arrive as strings and are
//! validated here, before anything is persisted.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chatlog_types::attachment::{
    AttachmentDownload, AttachmentInfo, DEFAULT_CONTENT_TYPE, MAX_ATTACHMENT_BYTES,
    NewAttachment,
};
use chatlog_types::chat::{
    AttachmentRef, ChatReply, Conversation, DEFAULT_TITLE, MessageView, NewMessage, Role,
    title_from_message,
};
use chatlog_types::error::ChatError;
use chatlog_types::id::RecordId;
use tracing::{debug, info};

use crate::reply::generator::ReplyGenerator;
use crate::repository::attachment::AttachmentRepository;
use crate::repository::conversation::ConversationRepository;
use crate::repository::message::MessageRepository;

/// Filename recorded when an upload arrives without one.
const FALLBACK_FILENAME: &str = "attachment";

/// An attachment upload as received from a client.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
    pub conversation_id: Option<String>,
    pub message_id: Option<String>,
}

/// Orchestrates the chat data lifecycle.
///
/// Generic over the repository traits to maintain clean architecture
/// (chatlog-core never depends on chatlog-infra).
pub struct ChatService<C, M, A>
where
    C: ConversationRepository,
    M: MessageRepository,
    A: AttachmentRepository,
{
    conversations: C,
    messages: M,
    attachments: A,
    replies: ReplyGenerator,
}

impl<C, M, A> ChatService<C, M, A>
where
    C: ConversationRepository,
    M: MessageRepository,
    A: AttachmentRepository,
{
    /// Create a new chat service with the given repositories and reply generator.
    pub fn new(conversations: C, messages: M, attachments: A, replies: ReplyGenerator) -> Self {
        Self {
            conversations,
            messages,
            attachments,
            replies,
        }
    }

    /// Access the reply generator.
    pub fn replies(&self) -> &ReplyGenerator {
        &self.replies
    }

    // --- Conversations ---

    /// Create a conversation. Missing or blank titles become "New Chat".
    pub async fn create_conversation(&self, title: Option<&str>) -> Result<Conversation, ChatError> {
        let title = match title {
            Some(t) if !t.trim().is_empty() => t,
            _ => DEFAULT_TITLE,
        };
        let conversation = self.conversations.insert_conversation(title).await?;
        info!(conversation_id = %conversation.id, "Conversation created");
        Ok(conversation)
    }

    /// All conversations, most recent first. Untimed conversations sort last.
    pub async fn list_conversations(&self) -> Result<Vec<Conversation>, ChatError> {
        let mut conversations = self.conversations.list_conversations().await?;
        conversations.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(conversations)
    }

    // --- Messages ---

    /// Messages of a conversation in creation order, timestamps normalized.
    pub async fn list_messages(&self, conversation_id: &str) -> Result<Vec<MessageView>, ChatError> {
        let conversation_id = RecordId::parse(conversation_id)?;
        let mut messages = self.messages.list_messages(&conversation_id).await?;
        messages.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(messages.iter().map(MessageView::from).collect())
    }

    /// Run one chat turn: store the user message, generate and store the reply.
    ///
    /// Without a `conversation_id` a new conversation is created, titled after
    /// the message. A supplied id must be well formed and must exist.
    pub async fn chat(
        &self,
        text: &str,
        conversation_id: Option<&str>,
        attachments: Vec<AttachmentRef>,
    ) -> Result<ChatReply, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::Validation("message cannot be empty".to_string()));
        }

        let conversation_id = match RecordId::parse_optional(conversation_id)? {
            Some(id) => {
                if self.conversations.get_conversation(&id).await?.is_none() {
                    return Err(ChatError::NotFound(format!("conversation {id}")));
                }
                id
            }
            None => {
                self.conversations
                    .insert_conversation(&title_from_message(text))
                    .await?
                    .id
            }
        };

        let attachment_names: Vec<String> =
            attachments.iter().map(|a| a.filename.clone()).collect();

        let user_message = self
            .messages
            .insert_message(&NewMessage {
                conversation_id,
                role: Role::User,
                content: text.to_string(),
                attachments,
            })
            .await?;
        debug!(message_id = %user_message.id, "User message stored");

        let reply_text = self.replies.generate(text, &attachment_names).await;

        let reply = self
            .messages
            .insert_message(&NewMessage {
                conversation_id,
                role: Role::Assistant,
                content: reply_text,
                attachments: Vec::new(),
            })
            .await?;

        info!(conversation_id = %conversation_id, reply_id = %reply.id, "Chat turn stored");

        Ok(ChatReply {
            conversation_id: conversation_id.to_string(),
            reply: MessageView::from(&reply),
        })
    }

    // --- Attachments ---

    /// Store an upload. Supplied conversation/message ids must be well formed.
    pub async fn upload_attachment(
        &self,
        upload: AttachmentUpload,
    ) -> Result<AttachmentInfo, ChatError> {
        let conversation_id = RecordId::parse_optional(upload.conversation_id.as_deref())?;
        let message_id = RecordId::parse_optional(upload.message_id.as_deref())?;

        if upload.bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(ChatError::Validation(format!(
                "attachment exceeds {MAX_ATTACHMENT_BYTES} bytes"
            )));
        }

        let filename = match upload.filename.trim() {
            "" => FALLBACK_FILENAME.to_string(),
            name => name.to_string(),
        };
        let content_type = match upload.content_type.trim() {
            "" => DEFAULT_CONTENT_TYPE.to_string(),
            ct => ct.to_string(),
        };

        let stored = self
            .attachments
            .insert_attachment(&NewAttachment {
                conversation_id,
                message_id,
                filename,
                content_type,
                size_bytes: upload.bytes.len() as u64,
                data: BASE64.encode(&upload.bytes),
            })
            .await?;

        info!(
            attachment_id = %stored.id,
            size_bytes = stored.size_bytes,
            "Attachment stored"
        );
        Ok(AttachmentInfo::from(&stored))
    }

    /// Fetch and decode an attachment.
    pub async fn download_attachment(
        &self,
        attachment_id: &str,
    ) -> Result<AttachmentDownload, ChatError> {
        let id = RecordId::parse(attachment_id)?;
        let attachment = self
            .attachments
            .get_attachment(&id)
            .await?
            .ok_or_else(|| ChatError::NotFound(format!("attachment {id}")))?;

        let bytes = BASE64
            .decode(attachment.data.as_bytes())
            .map_err(|e| ChatError::CorruptData(format!("attachment {id}: {e}")))?;

        Ok(AttachmentDownload {
            bytes,
            filename: attachment.filename,
            content_type: attachment.content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::rules;
    use crate::repository::memory::MemoryStore;

    type TestService = ChatService<MemoryStore, MemoryStore, MemoryStore>;

    fn service() -> (TestService, MemoryStore) {
        let store = MemoryStore::new();
        let service = ChatService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            ReplyGenerator::local(),
        );
        (service, store)
    }

    fn upload(bytes: &[u8]) -> AttachmentUpload {
        AttachmentUpload {
            bytes: bytes.to_vec(),
            filename: "notes.txt".to_string(),
            content_type: "text/plain".to_string(),
            conversation_id: None,
            message_id: None,
        }
    }

    // --- Conversations ---

    #[tokio::test]
    async fn create_conversation_defaults_title() {
        let (service, _) = service();
        assert_eq!(service.create_conversation(None).await.unwrap().title, "New Chat");
        assert_eq!(service.create_conversation(Some("")).await.unwrap().title, "New Chat");
        assert_eq!(service.create_conversation(Some("  ")).await.unwrap().title, "New Chat");
        assert_eq!(
            service.create_conversation(Some("Biology")).await.unwrap().title,
            "Biology"
        );
    }

    #[tokio::test]
    async fn list_conversations_most_recent_first_untimed_last() {
        let (service, store) = service();
        let untimed = store.push_untimed_conversation("legacy");
        let first = service.create_conversation(Some("first")).await.unwrap();
        let second = service.create_conversation(Some("second")).await.unwrap();

        let listed = service.list_conversations().await.unwrap();
        let ids: Vec<RecordId> = listed.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second.id, first.id, untimed]);
    }

    // --- Chat ---

    #[tokio::test]
    async fn chat_rejects_empty_text() {
        let (service, store) = service();
        for text in ["", "   ", "\n"] {
            let err = service.chat(text, None, Vec::new()).await.unwrap_err();
            assert!(matches!(err, ChatError::Validation(_)));
        }
        assert_eq!(store.conversation_count(), 0);
        assert_eq!(store.message_count(), 0);
    }

    #[tokio::test]
    async fn chat_without_conversation_creates_one_and_two_messages() {
        let (service, store) = service();
        let result = service.chat("hi", None, Vec::new()).await.unwrap();

        assert_eq!(store.conversation_count(), 1);
        assert_eq!(store.message_count(), 2);
        assert_eq!(result.reply.role, Role::Assistant);
        assert_eq!(result.reply.content, rules::generate("hi"));
        assert_eq!(result.reply.conversation_id, result.conversation_id);
        assert!(result.reply.created_at.is_some());

        let messages = service.list_messages(&result.conversation_id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].id, result.reply.id);
    }

    #[tokio::test]
    async fn chat_titles_new_conversation_from_message() {
        let (service, _) = service();
        let text = format!("  {}  ", "x".repeat(60));
        service.chat(&text, None, Vec::new()).await.unwrap();

        let conversations = service.list_conversations().await.unwrap();
        assert_eq!(conversations[0].title, "x".repeat(40));
    }

    #[tokio::test]
    async fn chat_stores_trimmed_text() {
        let (service, _) = service();
        let result = service.chat("   hello   ", None, Vec::new()).await.unwrap();
        let messages = service.list_messages(&result.conversation_id).await.unwrap();
        assert_eq!(messages[0].content, "hello");
    }

    #[tokio::test]
    async fn chat_continues_existing_conversation() {
        let (service, store) = service();
        let conversation = service.create_conversation(None).await.unwrap();
        let id = conversation.id.to_string();

        for text in ["hello", "tell me a joke", "help"] {
            let result = service.chat(text, Some(&id), Vec::new()).await.unwrap();
            assert_eq!(result.conversation_id, id);
        }

        assert_eq!(store.conversation_count(), 1);
        let messages = service.list_messages(&id).await.unwrap();
        assert_eq!(messages.len(), 6);
        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant
            ]
        );
        assert_eq!(messages[3].content, rules::JOKE_REPLY);
        let timestamps: Vec<_> = messages.iter().map(|m| m.created_at.clone()).collect();
        let mut sorted = timestamps.clone();
        sorted.sort();
        assert_eq!(timestamps, sorted);
    }

    #[tokio::test]
    async fn chat_rejects_malformed_conversation_id() {
        let (service, store) = service();
        let err = service
            .chat("hello", Some("not-an-id"), Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert_eq!(store.message_count(), 0);
    }

    #[tokio::test]
    async fn chat_rejects_unknown_conversation_id() {
        let (service, store) = service();
        let unknown = RecordId::new().to_string();
        let err = service
            .chat("hello", Some(&unknown), Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::NotFound(_)));
        assert_eq!(store.message_count(), 0);
    }

    #[tokio::test]
    async fn chat_keeps_attachments_on_user_message_only() {
        let (service, _) = service();
        let info = service.upload_attachment(upload(b"abc")).await.unwrap();
        let reference = AttachmentRef {
            id: RecordId::parse(&info.id).unwrap(),
            filename: info.filename.clone(),
        };

        let result = service
            .chat("look at this file please", None, vec![reference.clone()])
            .await
            .unwrap();
        assert!(result.reply.attachments.is_empty());

        let messages = service.list_messages(&result.conversation_id).await.unwrap();
        assert_eq!(messages[0].attachments, vec![reference]);
    }

    // --- Messages ---

    #[tokio::test]
    async fn list_messages_rejects_malformed_id() {
        let (service, _) = service();
        let err = service.list_messages("12345").await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
    }

    #[tokio::test]
    async fn list_messages_for_unknown_conversation_is_empty() {
        let (service, _) = service();
        let messages = service
            .list_messages(&RecordId::new().to_string())
            .await
            .unwrap();
        assert!(messages.is_empty());
    }

    // --- Attachments ---

    #[tokio::test]
    async fn attachment_roundtrip() {
        let (service, _) = service();
        let payload: Vec<u8> = (0..=255u8).collect();
        let mut request = upload(&payload);
        request.filename = "bytes.bin".to_string();
        request.content_type = "application/x-test".to_string();

        let info = service.upload_attachment(request).await.unwrap();
        assert_eq!(info.size, 256);
        assert_eq!(info.url, format!("/attachments/{}", info.id));

        let download = service.download_attachment(&info.id).await.unwrap();
        assert_eq!(download.bytes, payload);
        assert_eq!(download.filename, "bytes.bin");
        assert_eq!(download.content_type, "application/x-test");
    }

    #[tokio::test]
    async fn upload_fills_missing_filename_and_content_type() {
        let (service, _) = service();
        let mut request = upload(b"");
        request.filename = " ".to_string();
        request.content_type = String::new();

        let info = service.upload_attachment(request).await.unwrap();
        assert_eq!(info.filename, "attachment");
        assert_eq!(info.content_type, DEFAULT_CONTENT_TYPE);
        assert_eq!(info.size, 0);
    }

    #[tokio::test]
    async fn upload_validates_owner_ids() {
        let (service, _) = service();

        let mut request = upload(b"x");
        request.conversation_id = Some("bogus".to_string());
        let err = service.upload_attachment(request).await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));

        let mut request = upload(b"x");
        request.message_id = Some("bogus".to_string());
        let err = service.upload_attachment(request).await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));

        let mut request = upload(b"x");
        request.conversation_id = Some(RecordId::new().to_string());
        request.message_id = Some(RecordId::new().to_string());
        assert!(service.upload_attachment(request).await.is_ok());
    }

    #[tokio::test]
    async fn download_rejects_malformed_id() {
        let (service, _) = service();
        let err = service.download_attachment("xyz").await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
    }

    #[tokio::test]
    async fn download_unknown_id_is_not_found() {
        let (service, _) = service();
        let err = service
            .download_attachment(&RecordId::new().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::NotFound(_)));
    }

    #[tokio::test]
    async fn download_undecodable_payload_is_corrupt() {
        let (service, store) = service();
        let info = service.upload_attachment(upload(b"hello")).await.unwrap();
        let id = RecordId::parse(&info.id).unwrap();
        store.corrupt_attachment(&id, "%%% not base64 %%%");

        let err = service.download_attachment(&info.id).await.unwrap_err();
        assert!(matches!(err, ChatError::CorruptData(_)));
    }
}
