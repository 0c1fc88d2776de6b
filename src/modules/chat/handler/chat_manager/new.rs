use super::ChatManager;

impl ChatManager {
    pub fn new() -> Self {
        Self {
            chat_input: String::new(),
            search_input: String::new(),
            scroll_from_bottom: 0,
            conversation_cursor: 0,
        }
    }
}

impl Default for ChatManager {
    fn default() -> Self {
        Self::new()
    }
}
