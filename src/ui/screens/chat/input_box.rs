use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::modules::chat::{ChatHandler, Focus};
use crate::ui::style::border_style;

const MAX_INPUT_LINES: u16 = 6;

/// Rows needed for the input box, borders included.
pub fn input_height(chat: &ChatHandler) -> u16 {
    let lines = chat.chat_manager().get_input().split('\n').count() as u16;
    lines.clamp(1, MAX_INPUT_LINES) + 2
}

pub fn render_input_box(chat: &ChatHandler, area: Rect, buf: &mut Buffer) {
    let focused = chat.focus() == Focus::Input;
    let sending = chat.state().sending;

    let title = if sending { "Waiting for reply..." } else { "Type your message" };
    let cursor = if focused { "▏" } else { "" };
    let text = format!("> {}{}", chat.chat_manager().get_input(), cursor);

    let fg = if sending { Color::DarkGray } else { Color::Yellow };

    Paragraph::new(text)
        .block(
            Block::bordered()
                .title(title)
                .border_type(BorderType::Rounded)
                .border_style(border_style(focused)),
        )
        .style(Style::default().fg(fg))
        .wrap(Wrap { trim: false })
        .render(area, buf);
}
