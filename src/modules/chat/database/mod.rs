// src/modules/chat/database/mod.rs
// Message types and the storage backends for chat history

mod sqlite;
mod supabase;

pub use sqlite::SqliteStore;
pub use supabase::SupabaseStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::util::string::StringUtils;

pub const SNIPPET_CHARS: usize = 40;
pub const EMPTY_SNIPPET: &str = "(no messages)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub is_bot: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Message {
    pub fn new_user(content: String, conversation_id: Option<String>, user_id: &str) -> Self {
        Self::local(content, false, conversation_id, Some(user_id.to_string()))
    }

    pub fn new_bot(content: String, conversation_id: Option<String>, user_id: &str) -> Self {
        Self::local(content, true, conversation_id, Some(user_id.to_string()))
    }

    /// A message that has not been through a store yet; gets a client-side id.
    fn local(
        content: String,
        is_bot: bool,
        conversation_id: Option<String>,
        user_id: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content,
            is_bot,
            created_at: Utc::now(),
            conversation_id,
            user_id,
        }
    }

    pub fn to_new(&self, conversation_id: Option<String>) -> NewMessage {
        NewMessage {
            content: self.content.clone(),
            is_bot: self.is_bot,
            created_at: self.created_at,
            conversation_id,
            user_id: self.user_id.clone(),
        }
    }
}

/// Row payload for an insert; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMessage {
    pub content: String,
    pub is_bot: bool,
    pub created_at: DateTime<Utc>,
    pub conversation_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageQuery {
    pub limit: usize,
    pub conversation_id: Option<String>,
    pub user_id: Option<String>,
}

impl Default for MessageQuery {
    fn default() -> Self {
        Self {
            limit: crate::config::DEFAULT_HISTORY_LIMIT,
            conversation_id: None,
            user_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSummary {
    pub conversation_id: String,
    pub last_message_at: DateTime<Utc>,
    pub last_message_snippet: String,
}

/// Minimal projection used to build the conversation list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversationRow {
    pub conversation_id: Option<String>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Storage backend for chat messages
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Insert one row and return it as stored.
    async fn insert(&self, message: NewMessage) -> Result<Message>;

    /// Rows matching every set filter, oldest first, at most `query.limit`.
    async fn select(&self, query: &MessageQuery) -> Result<Vec<Message>>;

    /// The user's rows that belong to a conversation, newest first.
    async fn recent_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<ConversationRow>>;
}

/// Collapse newest-first rows into one summary per conversation.
pub fn summarize_conversations(rows: Vec<ConversationRow>, limit: usize) -> Vec<ConversationSummary> {
    let mut summaries: Vec<ConversationSummary> = Vec::new();

    for row in rows {
        let Some(conversation_id) = row.conversation_id else { continue };
        if summaries.iter().any(|s| s.conversation_id == conversation_id) {
            continue;
        }

        let last_message_snippet = match row.content {
            Some(content) => StringUtils::truncate_chars(&content, SNIPPET_CHARS),
            None => EMPTY_SNIPPET.to_string(),
        };

        summaries.push(ConversationSummary {
            conversation_id,
            last_message_at: row.created_at,
            last_message_snippet,
        });

        if summaries.len() == limit {
            break;
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(conversation: Option<&str>, content: Option<&str>, minute: u32) -> ConversationRow {
        ConversationRow {
            conversation_id: conversation.map(str::to_string),
            content: content.map(str::to_string),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn keeps_newest_row_per_conversation() {
        let rows = vec![
            row(Some("b"), Some("latest in b"), 30),
            row(Some("a"), Some("latest in a"), 20),
            row(Some("b"), Some("older in b"), 10),
            row(None, Some("orphan"), 5),
        ];

        let summaries = summarize_conversations(rows, 20);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].conversation_id, "b");
        assert_eq!(summaries[0].last_message_snippet, "latest in b");
        assert_eq!(summaries[1].conversation_id, "a");
    }

    #[test]
    fn snippet_is_truncated_and_limit_applied() {
        let long = "x".repeat(100);
        let rows = vec![
            row(Some("a"), Some(&long), 3),
            row(Some("b"), None, 2),
            row(Some("c"), Some("c"), 1),
        ];

        let summaries = summarize_conversations(rows, 2);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].last_message_snippet.chars().count(), SNIPPET_CHARS);
        assert_eq!(summaries[1].last_message_snippet, EMPTY_SNIPPET);
    }

    #[test]
    fn local_messages_get_distinct_ids() {
        let a = Message::new_user("hi".into(), None, "u");
        let b = Message::new_bot("hello".into(), None, "u");
        assert_ne!(a.id, b.id);
        assert!(!a.is_bot);
        assert!(b.is_bot);
    }
}
