use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::event::AppEvent;

use super::{ChatHandler, Focus};

impl ChatHandler {
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Option<AppEvent> {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppEvent::Quit);
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key_event),
            Focus::Conversations => self.handle_sidebar_key(key_event),
            Focus::Search => {
                self.handle_search_key(key_event);
                None
            }
        }
    }

    fn handle_input_key(&mut self, key_event: KeyEvent) -> Option<AppEvent> {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        match key_event.code {
            KeyCode::Esc => {
                if self.state.is_searching() {
                    self.state.clear_search();
                    self.chat_manager.search_input.clear();
                    None
                } else {
                    Some(AppEvent::Quit)
                }
            }
            KeyCode::Enter
                if key_event.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
            {
                self.chat_manager.handle_input('\n');
                None
            }
            KeyCode::Enter => self.submit_input().map(AppEvent::Dispatch),
            KeyCode::Tab => {
                self.focus = Focus::Conversations;
                None
            }
            KeyCode::Char('f') if ctrl => {
                self.chat_manager.search_input = self.state.search.clone().unwrap_or_default();
                self.focus = Focus::Search;
                None
            }
            KeyCode::Char('n') if ctrl => {
                self.new_conversation();
                None
            }
            KeyCode::Char('r') if ctrl => self.refresh_conversations().map(AppEvent::Dispatch),
            KeyCode::F(n @ 1..=4) => self.quick_action(n as usize - 1).map(AppEvent::Dispatch),
            KeyCode::Backspace => {
                self.chat_manager.backspace();
                None
            }
            KeyCode::Char(ch) if !ctrl => {
                self.chat_manager.handle_input(ch);
                None
            }
            KeyCode::Up => {
                self.chat_manager.scroll_up(1);
                None
            }
            KeyCode::Down => {
                self.chat_manager.scroll_down(1);
                None
            }
            KeyCode::PageUp => {
                self.chat_manager.page_up();
                None
            }
            KeyCode::PageDown => {
                self.chat_manager.page_down();
                None
            }
            _ => None,
        }
    }

    fn handle_sidebar_key(&mut self, key_event: KeyEvent) -> Option<AppEvent> {
        let len = self.state.conversations.len();

        match key_event.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => {
                self.focus = Focus::Input;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.chat_manager.move_cursor(-1, len);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.chat_manager.move_cursor(1, len);
                None
            }
            KeyCode::Char('n') => {
                self.new_conversation();
                None
            }
            KeyCode::Char('r') => self.refresh_conversations().map(AppEvent::Dispatch),
            KeyCode::Enter => self.select_highlighted_conversation().map(AppEvent::Dispatch),
            _ => None,
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                self.state.clear_search();
                self.chat_manager.search_input.clear();
                self.focus = Focus::Input;
            }
            KeyCode::Enter => {
                if self.chat_manager.search_input.trim().is_empty() {
                    self.state.clear_search();
                } else {
                    self.state.set_search(&self.chat_manager.search_input);
                }
                self.chat_manager.scroll_to_bottom();
                self.focus = Focus::Input;
            }
            KeyCode::Backspace => self.chat_manager.search_backspace(),
            KeyCode::Char(ch) => self.chat_manager.search_push(ch),
            _ => {}
        }
    }
}
