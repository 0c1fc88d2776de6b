// src/modules/chat/database/supabase.rs
// Hosted `messages` table reached through the PostgREST API

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::time::Duration;

use crate::config::SupabaseConfig;
use crate::error::{ChatError, Result};

use super::{ConversationRow, Message, MessageQuery, MessageStore, NewMessage};

const TABLE: &str = "messages";

#[derive(Debug, Clone)]
pub struct SupabaseStore {
    base_url: String,
    anon_key: String,
    client: reqwest::Client,
}

/// Row as returned by PostgREST; `id` may be a bigint or a uuid.
#[derive(Debug, Deserialize)]
struct MessageRow {
    id: serde_json::Value,
    content: String,
    is_bot: bool,
    created_at: DateTime<Utc>,
    #[serde(default)]
    conversation_id: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        let id = match row.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        Message {
            id,
            content: row.content,
            is_bot: row.is_bot,
            created_at: row.created_at,
            conversation_id: row.conversation_id,
            user_id: row.user_id,
        }
    }
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            client,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ChatError::Store(format!("{} {}", status.as_u16(), body.trim())))
    }
}

#[async_trait]
impl MessageStore for SupabaseStore {
    async fn insert(&self, message: NewMessage) -> Result<Message> {
        tracing::debug!(conversation_id = ?message.conversation_id, "inserting message row");

        let response = self
            .authorized(self.client.post(self.table_url()))
            .header("Prefer", "return=representation")
            .json(&message)
            .send()
            .await?;

        let rows: Vec<MessageRow> = Self::check(response).await?.json().await?;
        rows.into_iter()
            .next()
            .map(Message::from)
            .ok_or_else(|| ChatError::Store("insert returned no rows".to_string()))
    }

    async fn select(&self, query: &MessageQuery) -> Result<Vec<Message>> {
        let mut params: Vec<(String, String)> = vec![
            ("select".into(), "*".into()),
            ("order".into(), "created_at.asc".into()),
            ("limit".into(), query.limit.to_string()),
        ];
        if let Some(conversation_id) = &query.conversation_id {
            params.push(("conversation_id".into(), format!("eq.{}", conversation_id)));
        }
        if let Some(user_id) = &query.user_id {
            params.push(("user_id".into(), format!("eq.{}", user_id)));
        }

        tracing::debug!(?params, "selecting message rows");

        let response = self
            .authorized(self.client.get(self.table_url()))
            .query(&params)
            .send()
            .await?;

        let rows: Vec<MessageRow> = Self::check(response).await?.json().await?;
        Ok(rows.into_iter().map(Message::from).collect())
    }

    async fn recent_for_user(&self, user_id: &str, limit: usize) -> Result<Vec<ConversationRow>> {
        let params = [
            ("select", "conversation_id,content,created_at".to_string()),
            ("user_id", format!("eq.{}", user_id)),
            ("conversation_id", "not.is.null".to_string()),
            ("order", "created_at.desc".to_string()),
            ("limit", limit.to_string()),
        ];

        let response = self
            .authorized(self.client.get(self.table_url()))
            .query(&params)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }
}
