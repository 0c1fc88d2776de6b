use super::ChatManager;

const PAGE: usize = 10;

impl ChatManager {
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(PAGE);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(PAGE);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_from_bottom = 0;
    }

    /// Move the sidebar cursor by `delta`, staying inside `len` entries.
    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.conversation_cursor = 0;
            return;
        }
        let max = (len - 1) as isize;
        let next = (self.conversation_cursor as isize + delta).clamp(0, max);
        self.conversation_cursor = next as usize;
    }

    pub fn clamp_cursor(&mut self, len: usize) {
        self.move_cursor(0, len);
    }
}
