// src/modules/chat/database/sqlite.rs
// Local single-file message store with the same shape as the hosted table

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{ChatError, Result};

use super::{ConversationRow, Message, MessageQuery, MessageStore, NewMessage};

#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

// Manual Debug implementation since Mutex<Connection> doesn't implement Debug
impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("conn", &"Arc<Mutex<Connection>>")
            .finish()
    }
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .map_err(|e| ChatError::Store(format!("Failed to create db directory: {}", e)))?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                is_bot INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                conversation_id TEXT,
                user_id TEXT
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_messages_conversation
             ON messages (conversation_id, created_at)",
            [],
        )?;

        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| ChatError::from("sqlite connection poisoned"))
    }
}

fn encode_time(at: &DateTime<Utc>) -> String {
    // Fixed width so TEXT ordering matches time ordering
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_time(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(e),
        ))
}

fn message_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Message> {
    let created_at: String = row.get(3)?;
    Ok(Message {
        id: row.get(0)?,
        content: row.get(1)?,
        is_bot: row.get::<_, i64>(2)? != 0,
        created_at: decode_time(&created_at)?,
        conversation_id: row.get(4)?,
        user_id: row.get(5)?,
    })
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn insert(&self, message: NewMessage) -> Result<Message> {
        let id = uuid::Uuid::new_v4().to_string();
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO messages (id, content, is_bot, created_at, conversation_id, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                message.content,
                message.is_bot as i64,
                encode_time(&message.created_at),
                message.conversation_id,
                message.user_id,
            ],
        )?;

        let stored = conn
            .query_row(
                "SELECT id, content, is_bot, created_at, conversation_id, user_id
                 FROM messages WHERE id = ?1",
                params![id],
                message_from_row,
            )
            .optional()?;

        stored.ok_or_else(|| ChatError::Store(format!("inserted row {} not found", id)))
    }

    async fn select(&self, query: &MessageQuery) -> Result<Vec<Message>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, content, is_bot, created_at, conversation_id, user_id
             FROM messages
             WHERE (?1 IS NULL OR conversation_id = ?1)
               AND (?2 IS NULL OR user_id = ?2)
             ORDER BY created_at ASC, rowid ASC
             LIMIT ?3",
        )?;

        let rows = stmt.query_map(
            params![query.conversation_id, query.user_id, query.limit as i64],
            message_from_row,
        )?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?);
        }
        Ok(messages)
    }

    async fn recent_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<ConversationRow>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT conversation_id, content, created_at
             FROM messages
             WHERE user_id = ?1 AND conversation_id IS NOT NULL
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?2",
        )?;

        let rows = stmt.query_map(params![user_id, limit as i64], |row| {
            let created_at: String = row.get(2)?;
            Ok(ConversationRow {
                conversation_id: row.get(0)?,
                content: row.get(1)?,
                created_at: decode_time(&created_at)?,
            })
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }
}
