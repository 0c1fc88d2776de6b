// src/util/dify.rs
//! Client for the hosted chat-completion API (`POST /chat-messages`)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use crate::config::DifyConfig;
use crate::error::{ChatError, Result};

pub const FALLBACK_ANSWER: &str = "Could not get a response.";

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub answer: String,
    pub conversation_id: String,
    pub metadata: Option<serde_json::Value>,
}

/// Anything that can answer a chat message.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_message(
        &self,
        query: &str,
        user: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatReply>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    inputs: serde_json::Map<String, serde_json::Value>,
    query: &'a str,
    response_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<&'a str>,
    user: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    conversation_id: Option<String>,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DifyClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl DifyClient {
    pub fn new(config: &DifyConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat-messages", self.base_url)
    }
}

#[async_trait]
impl ChatBackend for DifyClient {
    async fn send_message(
        &self,
        query: &str,
        user: &str,
        conversation_id: Option<&str>,
    ) -> Result<ChatReply> {
        let api_key = self.api_key.as_deref().ok_or(ChatError::MissingApiKey)?;

        // An empty id means "start a new conversation", so it is not sent at all
        let conversation_id = conversation_id.filter(|id| !id.is_empty());

        let payload = ChatRequest {
            inputs: serde_json::Map::new(),
            query,
            response_mode: "blocking",
            conversation_id,
            user,
        };

        tracing::debug!(url = %self.endpoint(), ?conversation_id, "sending chat message");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .message
                .or(body.error)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
            tracing::warn!(status = status.as_u16(), %message, "chat API returned an error");
            return Err(ChatError::Api { status: status.as_u16(), message });
        }

        let data: ChatResponse = response.json().await?;

        Ok(ChatReply {
            answer: data
                .answer
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| FALLBACK_ANSWER.to_string()),
            conversation_id: data
                .conversation_id
                .filter(|id| !id.is_empty())
                .or_else(|| conversation_id.map(str::to_string))
                .unwrap_or_default(),
            metadata: data.metadata,
        })
    }
}
