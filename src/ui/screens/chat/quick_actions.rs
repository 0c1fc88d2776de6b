use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::modules::chat::quick_actions::QUICK_ACTIONS;

pub fn render_quick_actions(area: Rect, buf: &mut Buffer) {
    let mut spans = vec![Span::styled("Quick actions: ", Style::default().fg(Color::Gray))];
    for (i, action) in QUICK_ACTIONS.iter().enumerate() {
        spans.push(Span::styled(format!("F{}", i + 1), Style::default().fg(Color::Yellow).bold()));
        spans.push(Span::raw(format!(" {}  ", action.label)));
    }

    Paragraph::new(Line::from(spans)).render(area, buf);
}
