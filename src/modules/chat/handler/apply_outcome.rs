use crate::log_debug;
use crate::modules::chat::service::{ChatOutcome, ChatTask};

use super::ChatHandler;

impl ChatHandler {
    /// Fold a finished task into the screen state; returns follow-up tasks.
    pub fn apply(&mut self, outcome: ChatOutcome) -> Vec<ChatTask> {
        match outcome {
            ChatOutcome::Replied { reply, conversation_id, persisted } => {
                self.state.push(reply);
                if let Some(id) = conversation_id {
                    self.state.conversation_id = Some(id);
                }
                self.state.sending = false;
                self.chat_manager.scroll_to_bottom();

                if persisted {
                    vec![ChatTask::LoadConversations]
                } else {
                    Vec::new()
                }
            }
            ChatOutcome::HistoryLoaded { conversation_id, messages } => {
                if self.state.selected_conversation.as_deref() != Some(conversation_id.as_str()) {
                    log_debug!("Dropping stale history for {}", conversation_id);
                    return Vec::new();
                }
                self.state.replace_messages(conversation_id, messages);
                self.chat_manager.search_input.clear();
                self.chat_manager.scroll_to_bottom();
                Vec::new()
            }
            ChatOutcome::ConversationsLoaded(conversations) => {
                self.state.conversations = conversations;
                self.chat_manager.clamp_cursor(self.state.conversations.len());
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::database::Message;

    #[test]
    fn stale_history_is_ignored() {
        let mut handler = ChatHandler::new("u1".into(), true);
        handler.select_conversation("c2".into()).unwrap();

        let follow_ups = handler.apply(ChatOutcome::HistoryLoaded {
            conversation_id: "c1".into(),
            messages: vec![Message::new_user("old".into(), Some("c1".into()), "u1")],
        });

        assert!(follow_ups.is_empty());
        assert!(handler.state().messages.is_empty());
        assert_eq!(handler.state().selected_conversation.as_deref(), Some("c2"));
    }

    #[test]
    fn persisted_reply_refreshes_conversation_list() {
        let mut handler = ChatHandler::new("u1".into(), true);
        handler.submit("hi").unwrap();

        let follow_ups = handler.apply(ChatOutcome::Replied {
            reply: Message::new_bot("hello".into(), Some("c9".into()), "u1"),
            conversation_id: Some("c9".into()),
            persisted: true,
        });

        assert_eq!(follow_ups, vec![ChatTask::LoadConversations]);
        assert!(handler.state().is_current("c9"));
        assert!(!handler.state().sending);
    }
}
