use crate::modules::chat::service::ChatTask;

use super::{ChatHandler, Focus};

impl ChatHandler {
    /// Ask for a conversation's history. Refused while a send is in flight,
    /// so a late reply cannot land in the wrong conversation.
    pub fn select_conversation(&mut self, conversation_id: String) -> Option<ChatTask> {
        if self.state.sending {
            return None;
        }
        self.state.selected_conversation = Some(conversation_id.clone());
        Some(ChatTask::LoadHistory { conversation_id })
    }

    pub fn select_highlighted_conversation(&mut self) -> Option<ChatTask> {
        let id = self
            .state
            .conversations
            .get(self.chat_manager.conversation_cursor)?
            .conversation_id
            .clone();
        let task = self.select_conversation(id)?;
        self.focus = Focus::Input;
        Some(task)
    }

    /// Start over with an empty screen; the next send opens a new conversation.
    pub fn new_conversation(&mut self) -> bool {
        if self.state.sending {
            return false;
        }
        self.state.reset_conversation();
        self.chat_manager.search_input.clear();
        self.chat_manager.scroll_to_bottom();
        self.focus = Focus::Input;
        true
    }

    pub fn refresh_conversations(&self) -> Option<ChatTask> {
        self.persistence_enabled.then_some(ChatTask::LoadConversations)
    }
}
