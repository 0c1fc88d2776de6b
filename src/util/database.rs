// src/util/database.rs
// Persistence wrapper: every call degrades to an empty result instead of failing

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::modules::chat::database::{
    summarize_conversations, ConversationSummary, Message, MessageQuery, MessageStore, NewMessage,
    SqliteStore, SupabaseStore,
};
use crate::{log_error, log_info, log_warn};

/// Rows fetched per wanted conversation, since several rows collapse into one summary.
const CONVERSATION_OVERFETCH: usize = 5;

#[derive(Clone)]
pub struct Database {
    store: Option<Arc<dyn MessageStore>>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("store", &self.store.as_ref().map(|_| "Arc<dyn MessageStore>"))
            .finish()
    }
}

impl Database {
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        match config {
            StoreConfig::Supabase(supabase) => {
                log_info!("Persisting chat history to {}", supabase.url);
                Ok(Self::with_store(Arc::new(SupabaseStore::new(supabase)?)))
            }
            StoreConfig::Sqlite(path) => {
                log_info!("Persisting chat history to {}", path.display());
                Ok(Self::with_store(Arc::new(SqliteStore::open(path)?)))
            }
            StoreConfig::None => {
                log_warn!("No database configured. Chat history will not be saved.");
                Ok(Self::disabled())
            }
        }
    }

    pub fn with_store(store: Arc<dyn MessageStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    pub async fn save_message(&self, message: NewMessage) -> Option<Message> {
        let Some(store) = &self.store else {
            log_warn!("Database not configured, message not saved");
            return None;
        };

        match store.insert(message).await {
            Ok(saved) => Some(saved),
            Err(e) => {
                log_error!("Failed to save message: {}", e);
                None
            }
        }
    }

    pub async fn load_messages(&self, query: MessageQuery) -> Vec<Message> {
        let Some(store) = &self.store else {
            log_warn!("Database not configured, no history to load");
            return Vec::new();
        };

        match store.select(&query).await {
            Ok(messages) => messages,
            Err(e) => {
                log_error!("Failed to load messages: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn load_conversations(&self, user_id: &str, limit: usize) -> Vec<ConversationSummary> {
        let Some(store) = &self.store else {
            log_warn!("Database not configured, no conversations to list");
            return Vec::new();
        };

        let rows = limit.saturating_mul(CONVERSATION_OVERFETCH);
        match store.recent_for_user(user_id, rows).await {
            Ok(rows) => summarize_conversations(rows, limit),
            Err(e) => {
                log_error!("Failed to load conversations: {}", e);
                Vec::new()
            }
        }
    }
}
