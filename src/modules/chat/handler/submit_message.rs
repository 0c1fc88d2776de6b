use crate::log_debug;
use crate::modules::chat::{
    database::Message,
    quick_actions::quick_action,
    service::ChatTask,
};

use super::ChatHandler;

impl ChatHandler {
    /// Show `text` as a user message and hand back the send to run.
    ///
    /// Returns `None` without touching anything when the trimmed text is empty
    /// another send is still waiting for its reply, or a conversation's history
    /// is still loading.
    pub fn submit(&mut self, text: &str) -> Option<ChatTask> {
        let content = text.trim();
        if content.is_empty() {
            return None;
        }
        if self.state.sending {
            log_debug!("Send ignored, a reply is still pending");
            return None;
        }
        if let Some(pending) = &self.state.selected_conversation {
            log_debug!("Send ignored, history for {} is still loading", pending);
            return None;
        }

        let conversation_id = self.state.conversation_id.clone();
        let message = Message::new_user(content.to_string(), conversation_id.clone(), &self.user_id);

        self.state.push(message.clone());
        self.state.sending = true;
        self.chat_manager.scroll_to_bottom();

        Some(ChatTask::Send { message, conversation_id })
    }

    /// Submit whatever is in the input box, clearing it only if the send goes out.
    pub fn submit_input(&mut self) -> Option<ChatTask> {
        let text = self.chat_manager.get_input().to_string();
        let task = self.submit(&text)?;
        self.chat_manager.clear_input();
        Some(task)
    }

    pub fn quick_action(&mut self, index: usize) -> Option<ChatTask> {
        let action = quick_action(index)?;
        self.submit(action.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::service::ChatOutcome;

    #[test]
    fn whitespace_only_input_is_not_sent() {
        let mut handler = ChatHandler::new("u1".into(), false);
        assert!(handler.submit("   \n\t").is_none());
        assert!(handler.state().messages.is_empty());
        assert!(!handler.state().sending);
    }

    #[test]
    fn submit_trims_and_marks_busy() {
        let mut handler = ChatHandler::new("u1".into(), false);
        let task = handler.submit("  hello  ").unwrap();

        match task {
            ChatTask::Send { message, conversation_id } => {
                assert_eq!(message.content, "hello");
                assert!(conversation_id.is_none());
            }
            other => panic!("unexpected task {:?}", other),
        }
        assert!(handler.state().sending);
        assert!(handler.submit("second").is_none());
        assert_eq!(handler.state().messages.len(), 1);
    }

    #[test]
    fn refused_input_is_kept_in_the_box() {
        let mut handler = ChatHandler::new("u1".into(), false);
        handler.submit("first").unwrap();

        for ch in "draft".chars() {
            handler.chat_manager.handle_input(ch);
        }
        assert!(handler.submit_input().is_none());
        assert_eq!(handler.chat_manager().get_input(), "draft");
    }

    #[test]
    fn send_waits_for_selected_history() {
        let mut handler = ChatHandler::new("u1".into(), true);
        handler.state.conversation_id = Some("c1".into());

        handler.select_conversation("c2".into()).unwrap();
        assert!(handler.submit("to c1?").is_none());
        assert!(handler.quick_action(0).is_none());
        assert!(!handler.state().sending);

        let c2 = Message::new_user("c2 msg".into(), Some("c2".into()), "u1");
        handler.apply(ChatOutcome::HistoryLoaded {
            conversation_id: "c2".into(),
            messages: vec![c2],
        });

        let shown: Vec<_> = handler
            .state()
            .messages
            .iter()
            .map(|m| (m.content.as_str(), m.conversation_id.as_deref()))
            .collect();
        assert_eq!(shown, vec![("c2 msg", Some("c2"))]);
        assert_eq!(handler.state().conversation_id.as_deref(), Some("c2"));

        match handler.submit("now for c2").unwrap() {
            ChatTask::Send { conversation_id, .. } => {
                assert_eq!(conversation_id.as_deref(), Some("c2"))
            }
            other => panic!("unexpected task {:?}", other),
        }
    }

    #[test]
    fn quick_action_sends_preset_prompt() {
        let mut handler = ChatHandler::new("u1".into(), false);
        assert!(handler.quick_action(0).is_some());
        assert_eq!(handler.state().messages[0].content, "Tell me what this chatbot can do");
        assert!(handler.quick_action(9).is_none());
    }
}
