// src/modules/chat/service.rs
//! Network side of the chat screen: each [`ChatTask`] is one request/response chain.

use std::sync::Arc;

use super::database::{ConversationSummary, Message, MessageQuery};
use crate::util::{database::Database, dify::ChatBackend};
use crate::{log_debug, log_error};

/// Work the chat screen hands off to run outside the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatTask {
    Send {
        message: Message,
        conversation_id: Option<String>,
    },
    LoadHistory {
        conversation_id: String,
    },
    LoadConversations,
}

/// The result of a finished [`ChatTask`].
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutcome {
    Replied {
        reply: Message,
        /// Conversation to continue with; unchanged from the request when the call failed.
        conversation_id: Option<String>,
        persisted: bool,
    },
    HistoryLoaded {
        conversation_id: String,
        messages: Vec<Message>,
    },
    ConversationsLoaded(Vec<ConversationSummary>),
}

#[derive(Clone)]
pub struct ChatService {
    backend: Arc<dyn ChatBackend>,
    database: Database,
    user_id: String,
    history_limit: usize,
    conversation_limit: usize,
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("backend", &"Arc<dyn ChatBackend>")
            .field("database", &self.database)
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl ChatService {
    pub fn new(backend: Arc<dyn ChatBackend>, database: Database, user_id: String) -> Self {
        Self {
            backend,
            database,
            user_id,
            history_limit: crate::config::DEFAULT_HISTORY_LIMIT,
            conversation_limit: crate::config::DEFAULT_CONVERSATION_LIMIT,
        }
    }

    pub fn with_limits(mut self, history_limit: usize, conversation_limit: usize) -> Self {
        self.history_limit = history_limit;
        self.conversation_limit = conversation_limit;
        self
    }

    pub fn persistence_enabled(&self) -> bool {
        self.database.is_enabled()
    }

    pub async fn run(&self, task: ChatTask) -> ChatOutcome {
        match task {
            ChatTask::Send { message, conversation_id } => self.exchange(message, conversation_id).await,
            ChatTask::LoadHistory { conversation_id } => {
                let messages = self
                    .database
                    .load_messages(MessageQuery {
                        limit: self.history_limit,
                        conversation_id: Some(conversation_id.clone()),
                        user_id: Some(self.user_id.clone()),
                    })
                    .await;
                ChatOutcome::HistoryLoaded { conversation_id, messages }
            }
            ChatTask::LoadConversations => ChatOutcome::ConversationsLoaded(
                self.database
                    .load_conversations(&self.user_id, self.conversation_limit)
                    .await,
            ),
        }
    }

    async fn exchange(&self, message: Message, conversation_id: Option<String>) -> ChatOutcome {
        let result = self
            .backend
            .send_message(&message.content, &self.user_id, conversation_id.as_deref())
            .await;

        match result {
            Ok(reply) => {
                let conversation_id = Some(reply.conversation_id)
                    .filter(|id| !id.is_empty())
                    .or(conversation_id);
                log_debug!("Reply received for conversation {:?}", conversation_id);

                let bot = Message::new_bot(reply.answer, conversation_id.clone(), &self.user_id);

                let mut persisted = false;
                if self.database.is_enabled() {
                    let user_saved = self.database.save_message(message.to_new(conversation_id.clone())).await;
                    let bot_saved = self.database.save_message(bot.to_new(conversation_id.clone())).await;
                    persisted = user_saved.is_some() && bot_saved.is_some();
                }

                ChatOutcome::Replied { reply: bot, conversation_id, persisted }
            }
            Err(e) => {
                log_error!("Chat API error: {}", e);
                let bot = Message::new_bot(
                    format!("An error occurred: {}", e),
                    conversation_id.clone(),
                    &self.user_id,
                );
                ChatOutcome::Replied { reply: bot, conversation_id, persisted: false }
            }
        }
    }
}
