//! Message repository trait definition.

use chatlog_types::chat::{Message, NewMessage};
use chatlog_types::error::RepositoryError;
use chatlog_types::id::RecordId;

/// Repository trait for message persistence.
///
/// Messages are immutable once inserted. Implementations must reject a
/// message whose conversation does not exist.
pub trait MessageRepository: Send + Sync {
    /// Insert a message. The store assigns its id and creation time.
    fn insert_message(
        &self,
        message: &NewMessage,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;

    /// All messages of a conversation in insertion order.
    fn list_messages(
        &self,
        conversation_id: &RecordId,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;
}
