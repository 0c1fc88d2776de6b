use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::modules::chat::{ChatHandler, Focus};
use crate::ui::style::border_style;

pub fn render_search_bar(chat: &ChatHandler, area: Rect, buf: &mut Buffer) {
    let focused = chat.focus() == Focus::Search;

    let (text, fg) = if focused {
        (format!("Search: {}▏", chat.chat_manager().search_input), Color::Yellow)
    } else {
        let term = chat.state().search.as_deref().unwrap_or_default();
        (format!("Filter: {}  (Esc to clear)", term), Color::Gray)
    };

    Paragraph::new(text)
        .block(
            Block::bordered()
                .title("Search messages")
                .border_type(BorderType::Rounded)
                .border_style(border_style(focused)),
        )
        .style(Style::default().fg(fg))
        .render(area, buf);
}
