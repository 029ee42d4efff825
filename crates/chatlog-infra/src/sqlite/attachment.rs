//! SQLite attachment repository implementation.
//!
//! Payloads are kept inline as base64 text. Owner ids are optional and are
//! not constrained by foreign keys: an upload may precede its message.

use chatlog_core::repository::attachment::AttachmentRepository;
use chatlog_types::attachment::{Attachment, NewAttachment};
use chatlog_types::error::RepositoryError;
use chatlog_types::id::RecordId;
use chatlog_types::timestamp::format_for_store;
use chrono::Utc;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{parse_id, parse_optional_id, query_error, read_timestamp};

/// SQLite-backed implementation of `AttachmentRepository`.
pub struct SqliteAttachmentRepository {
    pool: DatabasePool,
}

impl SqliteAttachmentRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct AttachmentRow {
    id: String,
    conversation_id: Option<String>,
    message_id: Option<String>,
    filename: String,
    content_type: String,
    size_bytes: i64,
    data: String,
    created_at: Option<String>,
}

impl AttachmentRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            conversation_id: row.try_get("conversation_id")?,
            message_id: row.try_get("message_id")?,
            filename: row.try_get("filename")?,
            content_type: row.try_get("content_type")?,
            size_bytes: row.try_get("size_bytes")?,
            data: row.try_get("data")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_attachment(self) -> Result<Attachment, RepositoryError> {
        Ok(Attachment {
            id: parse_id(&self.id, "attachment id")?,
            conversation_id: parse_optional_id(self.conversation_id.as_deref(), "conversation id")?,
            message_id: parse_optional_id(self.message_id.as_deref(), "message id")?,
            filename: self.filename,
            content_type: self.content_type,
            size_bytes: u64::try_from(self.size_bytes).unwrap_or(0),
            data: self.data,
            created_at: read_timestamp(self.created_at.as_deref()),
        })
    }
}

impl AttachmentRepository for SqliteAttachmentRepository {
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

        let size = i64::try_from(stored.size_bytes)
            .map_err(|_| RepositoryError::Query("attachment size out of range".to_string()))?;

        sqlx::query(
            r#"INSERT INTO attachments
               (id, conversation_id, message_id, filename, content_type, size_bytes, data, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(stored.id.to_string())
        .bind(stored.conversation_id.map(|id| id.to_string()))
        .bind(stored.message_id.map(|id| id.to_string()))
        .bind(&stored.filename)
        .bind(&stored.content_type)
        .bind(size)
        .bind(&stored.data)
        .bind(stored.created_at.as_ref().map(format_for_store))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        tracing::debug!(
            attachment_id = %stored.id,
            size_bytes = stored.size_bytes,
            "stored attachment"
        );

        Ok(stored)
    }

    async fn get_attachment(&self, id: &RecordId) -> Result<Option<Attachment>, RepositoryError> {
        let row = sqlx::query(
            r#"SELECT id, conversation_id, message_id, filename, content_type, size_bytes, data, created_at
               FROM attachments WHERE id = ?"#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(query_error)?;

        match row {
            Some(row) => {
                let attachment_row = AttachmentRow::from_row(&row).map_err(query_error)?;
                Ok(Some(attachment_row.into_attachment()?))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::database_url;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url(dir.path());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn sample(conversation_id: Option<RecordId>) -> NewAttachment {
        NewAttachment {
            conversation_id,
            message_id: None,
            filename: "hello.txt".to_string(),
            content_type: "text/plain".to_string(),
            size_bytes: 5,
            data: "aGVsbG8=".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_attachment() {
        let repo = SqliteAttachmentRepository::new(test_pool().await);
        let owner = RecordId::new();

        let created = repo.insert_attachment(&sample(Some(owner))).await.unwrap();
        let found = repo.get_attachment(&created.id).await.unwrap().unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.conversation_id, Some(owner));
        assert_eq!(found.message_id, None);
        assert_eq!(found.filename, "hello.txt");
        assert_eq!(found.content_type, "text/plain");
        assert_eq!(found.size_bytes, 5);
        assert_eq!(found.data, "aGVsbG8=");
        assert!(found.created_at.is_some());
    }

    #[tokio::test]
    async fn test_attachment_without_owner() {
        let repo = SqliteAttachmentRepository::new(test_pool().await);
        let created = repo.insert_attachment(&sample(None)).await.unwrap();
        let found = repo.get_attachment(&created.id).await.unwrap().unwrap();
        assert!(found.conversation_id.is_none());
    }

    #[tokio::test]
    async fn test_get_missing_attachment() {
        let repo = SqliteAttachmentRepository::new(test_pool().await);
        assert!(repo.get_attachment(&RecordId::new()).await.unwrap().is_none());
    }
}
