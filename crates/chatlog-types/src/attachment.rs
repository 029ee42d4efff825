//! Attachment types for Chatlog.
//!
//! Attachments are binary uploads optionally tied to a conversation and/or
//! message. The payload is stored as a base64 text blob; the raw bytes only
//! exist in memory on upload and download.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::RecordId;

/// Maximum attachment size accepted on upload (25 MB).
pub const MAX_ATTACHMENT_BYTES: usize = 25 * 1024 * 1024;

/// Content type used when the client does not send one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An attachment to be inserted; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub conversation_id: Option<RecordId>,
    pub message_id: Option<RecordId>,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
    /// Base64-encoded payload.
    pub data: String,
}

/// A stored attachment, payload still encoded.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub id: RecordId,
    pub conversation_id: Option<RecordId>,
    pub message_id: Option<RecordId>,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub data: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Upload result returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentInfo {
    pub id: String,
    pub filename: String,
    pub content_type: String,
    pub size: u64,
    /// Relative download path for this attachment.
    pub url: String,
}

impl From<&Attachment> for AttachmentInfo {
    fn from(attachment: &Attachment) -> Self {
        Self {
            id: attachment.id.to_string(),
            filename: attachment.filename.clone(),
            content_type: attachment.content_type.clone(),
            size: attachment.size_bytes,
            url: download_path(&attachment.id),
        }
    }
}

/// Decoded attachment ready to be sent back to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentDownload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// Download path for an attachment id.
pub fn download_path(id: &RecordId) -> String {
    format!("/attachments/{id}")
}
