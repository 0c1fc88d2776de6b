use super::ChatManager;

impl ChatManager {
    pub fn get_input(&self) -> &str {
        &self.chat_input
    }

    pub fn handle_input(&mut self, ch: char) {
        self.chat_input.push(ch);
    }

    pub fn backspace(&mut self) {
        self.chat_input.pop();
    }

    pub fn clear_input(&mut self) {
        self.chat_input.clear();
    }

    pub fn search_push(&mut self, ch: char) {
        self.search_input.push(ch);
    }

    pub fn search_backspace(&mut self) {
        self.search_input.pop();
    }
}
