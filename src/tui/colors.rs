//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Priority;

/// Brand indigo, used for headers and the status bar.
pub const PRIMARY: Color = Color::Rgb(63, 81, 181);
/// Low priority badge.
pub const SUCCESS: Color = Color::Rgb(46, 125, 50);
/// Medium priority badge.
pub const WARNING: Color = Color::Rgb(245, 166, 35);
/// High priority badge and validation errors.
pub const DESTRUCTIVE: Color = Color::Rgb(198, 40, 40);
/// Completed tasks and disabled hints.
pub const MUTED: Color = Color::DarkGray;

/// Badge color for a priority level.
pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::Low => SUCCESS,
        Priority::Medium => WARNING,
        Priority::High => DESTRUCTIVE,
    }
}
