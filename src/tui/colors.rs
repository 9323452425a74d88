//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Priority, Status};

/// High priority marker
pub const RED: Color = Color::Rgb(239, 68, 68);
/// Medium priority marker
pub const AMBER: Color = Color::Rgb(245, 158, 11);
/// Low priority marker
pub const GREEN: Color = Color::Rgb(16, 185, 129);
pub const BLUE: Color = Color::Rgb(59, 130, 246);
pub const VIOLET: Color = Color::Rgb(139, 92, 246);
/// Unrecognised labels
pub const SLATE: Color = Color::Rgb(75, 85, 99);

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => RED,
        Priority::Medium => AMBER,
        Priority::Low => GREEN,
    }
}

/// Labels with a well-known meaning get their own color.
pub fn label_color(label: &str) -> Color {
    match label.to_lowercase().as_str() {
        "bug" => RED,
        "feature" => BLUE,
        "improvement" => GREEN,
        "documentation" => VIOLET,
        "design" => AMBER,
        _ => SLATE,
    }
}

pub fn column_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::Gray,
        Status::InProgress => BLUE,
        Status::Review => VIOLET,
        Status::Done => GREEN,
    }
}
