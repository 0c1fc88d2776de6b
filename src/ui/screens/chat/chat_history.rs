use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::modules::chat::{ChatHandler, Message};
use crate::ui::components::UiComponent;
use crate::ui::style::{BOT_COLOR, USER_COLOR};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render_chat_history(chat: &ChatHandler, tick: usize, area: Rect, buf: &mut Buffer) {
    let state = chat.state();
    let visible = state.visible_messages();

    let title = match &state.search {
        Some(term) => format!("Messages matching \"{}\" ({} of {})", term, visible.len(), state.messages.len()),
        None => "Messages".to_string(),
    };

    if visible.is_empty() {
        let text = match &state.search {
            Some(term) => format!("No messages contain \"{}\"", term),
            None if state.selected_conversation.is_some() => "Loading conversation...".to_string(),
            None => "Send a message to start the conversation".to_string(),
        };
        UiComponent::empty_message(&text, &title, Some(Color::DarkGray)).render(area, buf);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for message in visible {
        push_message_lines(&mut lines, message);
    }

    let mut block = Block::bordered()
        .title(title)
        .border_type(BorderType::Rounded);

    if state.sending {
        let frame = SPINNER[tick % SPINNER.len()];
        block = block.title_bottom(
            Line::from(format!(" {} Waiting for reply... ", frame)).style(Style::default().fg(BOT_COLOR)),
        );
    }

    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let total_lines: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(inner_width))
        .sum();

    // Keep the newest message in view unless the user scrolled up
    let max_scroll = total_lines.saturating_sub(inner_height);
    let from_bottom = chat.chat_manager().scroll_from_bottom.min(max_scroll);
    let offset = (max_scroll - from_bottom) as u16;

    Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0))
        .render(area, buf);
}

fn push_message_lines(lines: &mut Vec<Line>, message: &Message) {
    let (who, color, alignment) = if message.is_bot {
        ("Bot", BOT_COLOR, Alignment::Left)
    } else {
        ("You", USER_COLOR, Alignment::Right)
    };

    let time = message.created_at.with_timezone(&Local).format("%H:%M").to_string();

    lines.push(
        Line::from(vec![
            Span::styled(who, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(time, Style::default().fg(Color::DarkGray)),
        ])
        .alignment(alignment),
    );

    for content_line in message.content.lines() {
        lines.push(
            Line::from(Span::styled(content_line.to_string(), Style::default().fg(Color::White)))
                .alignment(alignment),
        );
    }

    lines.push(Line::from(""));
}
