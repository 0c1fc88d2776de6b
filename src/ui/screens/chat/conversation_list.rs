use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::modules::chat::{ChatHandler, Focus};
use crate::ui::components::UiComponent;
use crate::ui::style::{border_style, dim_unless_focused, USER_COLOR};
use crate::util::string::StringUtils;

pub fn render_conversation_list(chat: &ChatHandler, area: Rect, buf: &mut Buffer) {
    let state = chat.state();
    let focused = chat.focus() == Focus::Conversations;

    if state.conversations.is_empty() {
        let text = if chat.persistence_enabled() {
            "No conversations yet."
        } else {
            "History is off. Set SUPABASE_URL and SUPABASE_ANON_KEY, \
             or CHAT_SQLITE_PATH, to keep conversations."
        };
        let border = if focused { Color::Yellow } else { Color::DarkGray };
        UiComponent::empty_message(text, "Conversations", Some(border)).render(area, buf);
        return;
    }

    let items: Vec<ListItem> = state
        .conversations
        .iter()
        .map(|conversation| {
            let is_current = state.is_current(&conversation.conversation_id);
            let when = conversation
                .last_message_at
                .with_timezone(&Local)
                .format("%m/%d %H:%M")
                .to_string();
            let snippet_style = if is_current {
                Style::default().fg(USER_COLOR).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(vec![
                Line::from(Span::styled(when, Style::default().fg(Color::DarkGray))),
                Line::from(Span::styled(conversation.last_message_snippet.clone(), snippet_style)),
            ])
        })
        .collect();

    let title = StringUtils::maybe_pluralize_count(state.conversations.len(), ("conversation", "conversations"));

    let list = List::new(items)
        .block(
            Block::bordered()
                .title(Span::styled(title, dim_unless_focused(focused, Style::default())))
                .border_type(BorderType::Rounded)
                .border_style(border_style(focused)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("› ");

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(chat.chat_manager().conversation_cursor));
    }

    StatefulWidget::render(list, area, buf, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::{ChatOutcome, ConversationSummary};
    use crate::ui::buffer_text;
    use chrono::Utc;

    #[test]
    fn lists_conversation_snippets() {
        let mut chat = ChatHandler::new("u1".into(), true);
        chat.apply(ChatOutcome::ConversationsLoaded(vec![
            ConversationSummary {
                conversation_id: "c1".into(),
                last_message_at: Utc::now(),
                last_message_snippet: "weekly planning".into(),
            },
            ConversationSummary {
                conversation_id: "c2".into(),
                last_message_at: Utc::now(),
                last_message_snippet: "travel expenses".into(),
            },
        ]));

        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        render_conversation_list(&chat, area, &mut buf);
        let text = buffer_text(&buf);

        assert!(text.contains("2 conversations"));
        assert!(text.contains("weekly planning"));
        assert!(text.contains("travel expenses"));
    }

    #[test]
    fn explains_when_history_is_off() {
        let chat = ChatHandler::new("u1".into(), false);
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        render_conversation_list(&chat, area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("History is off"));
        assert!(text.contains("CHAT_SQLITE_PATH"));
    }
}
