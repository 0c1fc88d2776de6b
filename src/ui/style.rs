#[allow(unused_imports)] /// Needed for Stylize in this scope
use ratatui::style::{Style, Stylize};
use ratatui::style::Color;

pub const USER_COLOR: Color = Color::Cyan;
pub const BOT_COLOR: Color = Color::Green;
pub const ACCENT: Color = Color::Yellow;

pub fn dim_unless_focused(is_focused: bool, style: Style) -> Style {
    if is_focused { style.bold() } else { style.dim().italic() }
}

pub fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
