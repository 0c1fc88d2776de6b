use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::modules::chat::{ChatHandler, Focus};
use crate::ui::components::UiComponent;
use crate::ui::style::ACCENT;

pub mod chat_history;
pub mod conversation_list;
pub mod input_box;
pub mod quick_actions;
pub mod search_bar;

const SIDEBAR_WIDTH: u16 = 30;

pub fn render_chat_screen(chat: &ChatHandler, tick: usize, area: Rect, buf: &mut Buffer) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(5),     // Sidebar + chat
        ])
        .split(area);

    render_header(chat, main_layout[0], buf);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH),
            Constraint::Min(20),
        ])
        .split(main_layout[1]);

    conversation_list::render_conversation_list(chat, body[0], buf);

    let show_search = chat.focus() == Focus::Search || chat.state().is_searching();
    let input_height = input_box::input_height(chat);

    let column = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if show_search { 3 } else { 0 }),
            Constraint::Length(1),             // Quick actions
            Constraint::Min(3),                // Messages
            Constraint::Length(input_height),  // Input box
            Constraint::Length(1),             // Help
        ])
        .split(body[1]);

    if show_search {
        search_bar::render_search_bar(chat, column[0], buf);
    }
    quick_actions::render_quick_actions(column[1], buf);
    chat_history::render_chat_history(chat, tick, column[2], buf);
    input_box::render_input_box(chat, column[3], buf);
    UiComponent::help(help_text(chat.focus())).render(column[4], buf);
}

fn render_header(chat: &ChatHandler, area: Rect, buf: &mut Buffer) {
    let conversation = match &chat.state().conversation_id {
        Some(id) => format!("conversation {}", short_id(id)),
        None => "new conversation".to_string(),
    };
    let history = if chat.persistence_enabled() { "history on" } else { "history off" };

    let header = Paragraph::new(Line::from(vec![
        Span::styled("AI Chatbot", Style::default().fg(ACCENT).bold()),
        Span::raw("  "),
        Span::styled("Talk to me anytime", Style::default().fg(Color::Gray)),
        Span::raw("  •  "),
        Span::styled(conversation, Style::default().fg(Color::DarkGray)),
        Span::raw("  •  "),
        Span::styled(history, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::bordered().border_type(BorderType::Rounded))
    .alignment(Alignment::Left);

    header.render(area, buf);
}

fn help_text(focus: Focus) -> &'static str {
    match focus {
        Focus::Input => "Enter: send • Alt+Enter: newline • Tab: conversations • Ctrl+F: search • Ctrl+N: new • F1-F4: quick actions • Esc: quit",
        Focus::Conversations => "↑↓: move • Enter: open • n: new conversation • r: refresh • Tab/Esc: back to input",
        Focus::Search => "Type to search • Enter: apply • Esc: clear search",
    }
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_text;

    fn render(chat: &ChatHandler) -> String {
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        render_chat_screen(chat, 0, area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn empty_screen_invites_first_message() {
        let chat = ChatHandler::new("u1".into(), false);
        let text = render(&chat);
        assert!(text.contains("AI Chatbot"));
        assert!(text.contains("Send a message to start the conversation"));
        assert!(text.contains("history off"));
    }

    #[test]
    fn sent_message_and_waiting_indicator_are_shown() {
        let mut chat = ChatHandler::new("u1".into(), false);
        chat.submit("ping the bot").unwrap();
        let text = render(&chat);
        assert!(text.contains("ping the bot"));
        assert!(text.contains("Waiting for reply"));
    }
}
