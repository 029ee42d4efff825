//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and HTTP API.
//! `ChatService` is generic over the repository traits; AppState pins it to the
//! SQLite implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use chatlog_core::chat::service::ChatService;
use chatlog_core::reply::generator::ReplyGenerator;
use chatlog_infra::config::resolve_api_key;
use chatlog_infra::llm::create_provider;
use chatlog_infra::sqlite::attachment::SqliteAttachmentRepository;
use chatlog_infra::sqlite::conversation::SqliteConversationRepository;
use chatlog_infra::sqlite::message::SqliteMessageRepository;
use chatlog_infra::sqlite::pool::{DatabasePool, database_url};
use chatlog_types::config::GlobalConfig;

/// Concrete type alias for the chat service pinned to infra implementations.
pub type ConcreteChatService = ChatService<
    SqliteConversationRepository,
    SqliteMessageRepository,
    SqliteAttachmentRepository,
>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

/// Store connectivity diagnostic shared by `chatlog status` and `GET /status`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub backend: &'static str,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub tables: Vec<String>,
    pub provider: Option<String>,
}

/// Number of table names included in a status report.
const STATUS_TABLE_LIMIT: usize = 10;

impl AppState {
    /// Initialize the application state: connect to DB, build the provider, wire services.
    pub async fn init(data_dir: &Path, config: &GlobalConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let db_pool = DatabasePool::new(&database_url(data_dir)).await?;

        let provider = create_provider(&config.provider, resolve_api_key(&config.provider));
        let replies = ReplyGenerator::new(provider);

        Ok(Self::from_parts(db_pool, data_dir.to_path_buf(), replies))
    }

    /// Wire services over an existing pool.
    pub fn from_parts(db_pool: DatabasePool, data_dir: PathBuf, replies: ReplyGenerator) -> Self {
        let chat_service = ChatService::new(
            SqliteConversationRepository::new(db_pool.clone()),
            SqliteMessageRepository::new(db_pool.clone()),
            SqliteAttachmentRepository::new(db_pool.clone()),
            replies,
        );

        Self {
            chat_service: Arc::new(chat_service),
            data_dir,
            db_pool,
        }
    }

    /// Probe the store. Never fails: a broken store is reported, not raised.
    pub async fn status_report(&self) -> StatusReport {
        let provider = self
            .chat_service
            .replies()
            .provider_name()
            .map(str::to_string);

        let probe = async {
            self.db_pool.ping().await?;
            self.db_pool.table_names().await
        };

        match probe.await {
            Ok(mut tables) => {
                tables.truncate(STATUS_TABLE_LIMIT);
                StatusReport {
                    backend: "ok",
                    database: "connected",
                    error: None,
                    tables,
                    provider,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "store diagnostic failed");
                StatusReport {
                    backend: "ok",
                    database: "error",
                    error: Some(e.to_string()),
                    tables: Vec::new(),
                    provider,
                }
            }
        }
    }
}
