//! SQLite message repository implementation.

use chatlog_core::repository::message::MessageRepository;
use chatlog_types::chat::{AttachmentRef, Message, NewMessage, Role};
use chatlog_types::error::RepositoryError;
use chatlog_types::id::RecordId;
use chatlog_types::timestamp::format_for_store;
use chrono::Utc;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{parse_id, query_error, read_timestamp};

/// SQLite-backed implementation of `MessageRepository`.
///
/// Attachment references are stored as a JSON array in the `attachments` column.
pub struct SqliteMessageRepository {
    pool: DatabasePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct MessageRow {
    id: String,
    conversation_id: String,
    role: String,
    content: String,
    attachments: Option<String>,
    created_at: Option<String>,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            conversation_id: row.try_get("conversation_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            attachments: row.try_get("attachments")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let role: Role = self.role.parse().map_err(RepositoryError::Query)?;
        let attachments: Vec<AttachmentRef> = match self.attachments.as_deref() {
            None | Some("") => Vec::new(),
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| RepositoryError::Query(format!("invalid attachments: {e}")))?,
        };

        Ok(Message {
            id: parse_id(&self.id, "message id")?,
            conversation_id: parse_id(&self.conversation_id, "conversation id")?,
            role,
            content: self.content,
            attachments,
            created_at: read_timestamp(self.created_at.as_deref()),
        })
    }
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db) => db.message().contains("FOREIGN KEY constraint failed"),
        _ => false,
    }
}

impl MessageRepository for SqliteMessageRepository {
    async fn insert_message(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let stored = Message {
            id: RecordId::new(),
            conversation_id: message.conversation_id,
            role: message.role,
            content: message.content.clone(),
            attachments: message.attachments.clone(),
            created_at: Some(Utc::now()),
        };

        let attachments_json = serde_json::to_string(&stored.attachments)
            .map_err(|e| RepositoryError::Query(format!("failed to encode attachments: {e}")))?;

        sqlx::query(
            r#"INSERT INTO messages (id, conversation_id, role, content, attachments, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(stored.id.to_string())
        .bind(stored.conversation_id.to_string())
        .bind(stored.role.to_string())
        .bind(&stored.content)
        .bind(attachments_json)
        .bind(stored.created_at.as_ref().map(format_for_store))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                RepositoryError::Conflict(format!(
                    "conversation {} does not exist",
                    stored.conversation_id
                ))
            } else {
                query_error(e)
            }
        })?;

        Ok(stored)
    }

    async fn list_messages(
        &self,
        conversation_id: &RecordId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT id, conversation_id, role, content, attachments, created_at
               FROM messages WHERE conversation_id = ? ORDER BY rowid"#,
        )
        .bind(conversation_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows.iter()
            .map(|row| {
                MessageRow::from_row(row)
                    .map_err(query_error)
                    .and_then(MessageRow::into_message)
            })
            .collect()
    }
}
