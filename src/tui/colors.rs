//! Color constants for the terminal user interface.

use ratatui::style::{Color, Style};

use crate::fields::Status;

/// Accent for the To Do column
pub const SLATE: Color = Color::Rgb(100, 116, 139);
/// Accent for the In Progress column
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Accent for the Done column
pub const DARK_GREEN: Color = Color::Rgb(0, 120, 0);
/// Text and border of overdue cards
pub const OVERDUE_RED: Color = Color::Rgb(220, 38, 38);

const BUG_BG: Color = Color::Rgb(254, 226, 226);
const BUG_FG: Color = Color::Rgb(153, 27, 27);
const FEATURE_BG: Color = Color::Rgb(219, 234, 254);
const FEATURE_FG: Color = Color::Rgb(30, 64, 175);
const URGENT_BG: Color = Color::Rgb(254, 249, 195);
const URGENT_FG: Color = Color::Rgb(133, 77, 14);
const DESIGN_BG: Color = Color::Rgb(252, 231, 243);
const DESIGN_FG: Color = Color::Rgb(157, 23, 77);
const GENERAL_BG: Color = Color::Rgb(243, 244, 246);
const GENERAL_FG: Color = Color::Rgb(31, 41, 55);

/// Badge style for a tag; known tags are matched trimmed and case-insensitively.
pub fn tag_style(tag: &str) -> Style {
    let (fg, bg) = match tag.trim().to_lowercase().as_str() {
        "bug" => (BUG_FG, BUG_BG),
        "feature" => (FEATURE_FG, FEATURE_BG),
        "urgent" => (URGENT_FG, URGENT_BG),
        "design" => (DESIGN_FG, DESIGN_BG),
        _ => (GENERAL_FG, GENERAL_BG),
    };
    Style::default().fg(fg).bg(bg)
}

pub fn column_accent(status: Status) -> Color {
    match status {
        Status::Todo => SLATE,
        Status::InProgress => GOLD,
        Status::Done => DARK_GREEN,
    }
}
