mod new;
mod input;
mod scroll;

/// Manages chat UI state that never leaves the terminal
#[derive(Debug)]
pub struct ChatManager {
    pub chat_input: String,
    pub search_input: String,
    /// Lines scrolled up from the newest message; 0 follows the conversation.
    pub scroll_from_bottom: usize,
    pub conversation_cursor: usize,
}
