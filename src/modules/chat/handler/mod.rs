mod chat_manager;
mod new;
mod submit_message;
mod apply_outcome;
mod conversations;
mod handle_key;

pub use chat_manager::ChatManager;

use super::state::ChatState;

/// Which part of the chat screen receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Conversations,
    Search,
}

/// Coordinates interaction with the chat screen
#[derive(Debug)]
pub struct ChatHandler {
    state: ChatState,
    chat_manager: ChatManager,
    focus: Focus,
    user_id: String,
    persistence_enabled: bool,
}

impl ChatHandler {
    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn chat_manager(&self) -> &ChatManager {
        &self.chat_manager
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn persistence_enabled(&self) -> bool {
        self.persistence_enabled
    }
}
