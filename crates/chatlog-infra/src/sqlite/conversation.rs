//! SQLite conversation repository implementation.
//!
//! Implements `ConversationRepository` from `chatlog-core` using sqlx with split
//! read/write pools. Raw queries, a private Row struct, and lenient timestamp reads.

use chatlog_core::repository::conversation::ConversationRepository;
use chatlog_types::chat::Conversation;
use chatlog_types::error::RepositoryError;
use chatlog_types::id::RecordId;
use chatlog_types::timestamp::format_for_store;
use chrono::Utc;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{parse_id, query_error, read_timestamp};

/// SQLite-backed implementation of `ConversationRepository`.
pub struct SqliteConversationRepository {
    pool: DatabasePool,
}

impl SqliteConversationRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Conversation.
struct ConversationRow {
    id: String,
    title: String,
    created_at: Option<String>,
}

impl ConversationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_conversation(self) -> Result<Conversation, RepositoryError> {
        Ok(Conversation {
            id: parse_id(&self.id, "conversation id")?,
            title: self.title,
            created_at: read_timestamp(self.created_at.as_deref()),
        })
    }
}

impl ConversationRepository for SqliteConversationRepository {
    async fn insert_conversation(&self, title: &str) -> Result<Conversation, RepositoryError> {
        let conversation = Conversation {
            id: RecordId::new(),
            title: title.to_string(),
            created_at: Some(Utc::now()),
        };

        sqlx::query("INSERT INTO conversations (id, title, created_at) VALUES (?, ?, ?)")
            .bind(conversation.id.to_string())
            .bind(&conversation.title)
            .bind(conversation.created_at.as_ref().map(format_for_store))
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        Ok(conversation)
    }

    async fn get_conversation(
        &self,
        id: &RecordId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let row = sqlx::query("SELECT id, title, created_at FROM conversations WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let conversation_row = ConversationRow::from_row(&row).map_err(query_error)?;
                Ok(Some(conversation_row.into_conversation()?))
            }
            None => Ok(None),
        }
    }

    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepositoryError> {
        let rows = sqlx::query("SELECT id, title, created_at FROM conversations ORDER BY rowid")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let mut conversations = Vec::with_capacity(rows.len());
        for row in &rows {
            let conversation_row = ConversationRow::from_row(row).map_err(query_error)?;
            conversations.push(conversation_row.into_conversation()?);
        }

        Ok(conversations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::database_url;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url(dir.path());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_conversation() {
        let repo = SqliteConversationRepository::new(test_pool().await);

        let created = repo.insert_conversation("Chemistry").await.unwrap();
        assert_eq!(created.title, "Chemistry");
        assert!(created.created_at.is_some());

        let found = repo.get_conversation(&created.id).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.title, "Chemistry");
        assert_eq!(found.created_at, created.created_at.map(|dt| {
            // Stored with microsecond precision
            chatlog_types::timestamp::parse_lenient(&format_for_store(&dt)).unwrap()
        }));
    }

    #[tokio::test]
    async fn test_get_missing_conversation() {
        let repo = SqliteConversationRepository::new(test_pool().await);
        assert!(repo.get_conversation(&RecordId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_conversations_in_insertion_order() {
        let repo = SqliteConversationRepository::new(test_pool().await);
        let a = repo.insert_conversation("a").await.unwrap();
        let b = repo.insert_conversation("b").await.unwrap();

        let listed = repo.list_conversations().await.unwrap();
        let ids: Vec<RecordId> = listed.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn test_unreadable_timestamp_becomes_none() {
        let pool = test_pool().await;
        let repo = SqliteConversationRepository::new(pool.clone());

        let id = RecordId::new();
        sqlx::query("INSERT INTO conversations (id, title, created_at) VALUES (?, ?, ?)")
            .bind(id.to_string())
            .bind("imported")
            .bind("last tuesday")
            .execute(&pool.writer)
            .await
            .unwrap();

        let found = repo.get_conversation(&id).await.unwrap().unwrap();
        assert_eq!(found.title, "imported");
        assert!(found.created_at.is_none());
    }
}
