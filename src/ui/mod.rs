pub mod components;
pub mod screens;
pub mod style;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};
use crate::app::App;
use crate::ui::screens::chat::render_chat_screen;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_chat_screen(&self.chat, self.tick_count, area, buf);
    }
}

/// Flatten a rendered buffer into text, one row per line.
#[cfg(test)]
pub(crate) fn buffer_text(buf: &Buffer) -> String {
    let width = buf.area.width as usize;
    buf.content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
