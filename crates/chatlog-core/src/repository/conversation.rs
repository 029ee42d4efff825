//! Conversation repository trait definition.

use chatlog_types::chat::Conversation;
use chatlog_types::error::RepositoryError;
use chatlog_types::id::RecordId;

/// Repository trait for conversation persistence.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ConversationRepository: Send + Sync {
    /// Insert a conversation. The store assigns its id and creation time.
    fn insert_conversation(
        &self,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Conversation, RepositoryError>> + Send;

    /// Get a conversation by its id.
    fn get_conversation(
        &self,
        id: &RecordId,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// All conversations in insertion order.
    fn list_conversations(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, RepositoryError>> + Send;
}
