// src/modules/chat/state.rs
use super::database::{ConversationSummary, Message};
use crate::util::string::StringUtils;

/// What the chat screen is showing. Holds no handles to the outside world.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub messages: Vec<Message>,
    /// Conversation the next send continues; `None` starts a new one.
    pub conversation_id: Option<String>,
    /// A send is in flight.
    pub sending: bool,
    pub search: Option<String>,
    pub conversations: Vec<ConversationSummary>,
    /// Conversation whose history load is pending.
    pub selected_conversation: Option<String>,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn visible_messages(&self) -> Vec<&Message> {
        match &self.search {
            Some(term) => self
                .messages
                .iter()
                .filter(|m| StringUtils::contains_ignore_case(&m.content, term))
                .collect(),
            None => self.messages.iter().collect(),
        }
    }

    /// Apply a search term. A blank term leaves the current filter alone.
    pub fn set_search(&mut self, term: &str) {
        let term = term.trim();
        if !term.is_empty() {
            self.search = Some(term.to_string());
        }
    }

    pub fn clear_search(&mut self) {
        self.search = None;
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    pub fn replace_messages(&mut self, conversation_id: String, messages: Vec<Message>) {
        self.messages = messages;
        self.conversation_id = Some(conversation_id);
        self.selected_conversation = None;
        self.search = None;
    }

    pub fn reset_conversation(&mut self) {
        self.messages.clear();
        self.conversation_id = None;
        self.selected_conversation = None;
        self.search = None;
    }

    pub fn is_current(&self, conversation_id: &str) -> bool {
        self.conversation_id.as_deref() == Some(conversation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(contents: &[&str]) -> ChatState {
        let mut state = ChatState::new();
        for c in contents {
            state.push(Message::new_user(c.to_string(), None, "u1"));
        }
        state
    }

    #[test]
    fn search_filters_case_insensitively_and_clear_restores() {
        let mut state = state_with(&["Rust is great", "hello", "I like RUST"]);

        state.set_search("rust");
        let visible: Vec<&str> = state.visible_messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(visible, vec!["Rust is great", "I like RUST"]);

        state.clear_search();
        assert_eq!(state.visible_messages().len(), 3);
    }

    #[test]
    fn blank_search_term_is_ignored() {
        let mut state = state_with(&["a"]);
        state.set_search("   ");
        assert!(!state.is_searching());
    }

    #[test]
    fn replace_messages_tracks_conversation_and_clears_search() {
        let mut state = state_with(&["old"]);
        state.set_search("old");
        state.selected_conversation = Some("c2".into());

        state.replace_messages("c2".into(), vec![Message::new_bot("new".into(), Some("c2".into()), "u1")]);

        assert!(state.is_current("c2"));
        assert!(state.selected_conversation.is_none());
        assert!(!state.is_searching());
        assert_eq!(state.messages.len(), 1);
    }
}
