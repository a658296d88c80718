mod celebration;
mod exercise;
pub mod layout;
mod menu;

use crate::models::Section;
use ratatui::style::Color;

pub use celebration::draw_celebration;
pub use exercise::draw_exercise;
pub use layout::{calculate_exercise_chunks, calculate_menu_chunks};
pub use menu::{draw_menu, draw_quit_confirmation, progress_line};

/// Accent color for a section's borders and title.
pub fn section_color(section: Section) -> Color {
    match section {
        Section::Verbs => Color::LightMagenta,
        Section::Vocabulary => Color::LightGreen,
        Section::Pronouns => Color::LightBlue,
        Section::Existence => Color::LightCyan,
        Section::Story => Color::Yellow,
        Section::SimplePast => Color::LightRed,
        Section::Bonus => Color::Magenta,
    }
}
