use super::{ChatHandler, ChatManager, Focus};
use crate::modules::chat::{service::ChatTask, state::ChatState};

impl ChatHandler {
    pub fn new(user_id: String, persistence_enabled: bool) -> Self {
        Self {
            state: ChatState::new(),
            chat_manager: ChatManager::new(),
            focus: Focus::Input,
            user_id,
            persistence_enabled,
        }
    }

    /// Tasks to run once the screen is up.
    pub fn startup_tasks(&self) -> Vec<ChatTask> {
        if self.persistence_enabled {
            vec![ChatTask::LoadConversations]
        } else {
            Vec::new()
        }
    }
}
