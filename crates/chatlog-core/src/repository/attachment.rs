//! Attachment repository trait definition.

use chatlog_types::attachment::{Attachment, NewAttachment};
use chatlog_types::error::RepositoryError;
use chatlog_types::id::RecordId;

/// Repository trait for attachment persistence.
///
/// The payload is stored exactly as given (already base64-encoded).
pub trait AttachmentRepository: Send + Sync {
    /// Insert an attachment. The store assigns its id and creation time.
    fn insert_attachment(
        &self,
        attachment: &NewAttachment,
    ) -> impl std::future::Future<Output = Result<Attachment, RepositoryError>> + Send;

    /// Get an attachment, payload included.
    fn get_attachment(
        &self,
        id: &RecordId,
    ) -> impl std::future::Future<Output = Result<Option<Attachment>, RepositoryError>> + Send;
}
