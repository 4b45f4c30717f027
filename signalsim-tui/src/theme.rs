//! Neon-on-charcoal palette and style helpers.
//!
//! - **Accent**: electric cyan (focus, highlights)
//! - **Positive**: neon green (up signals, positive change)
//! - **Negative**: orange-red (down signals, negative change)
//! - **Warning**: neon orange (rejected actions, cooldown)
//! - **Muted**: steel blue (hints, secondary text)

use ratatui::style::{Color, Modifier, Style};

use signalsim_core::present::Rgb;
use signalsim_core::Direction;

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 127);
pub const NEGATIVE: Color = Color::Rgb(255, 69, 0);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;
pub const TEXT_DIM: Color = Color::Rgb(170, 170, 170);
pub const EMPTY_SEGMENT: Color = Color::Rgb(75, 85, 99);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

/// Highlight for the row under the cursor.
pub fn cursor_row() -> Style {
    Style::default()
        .fg(BACKGROUND)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Marker style for the recorded selection.
pub fn selected() -> Style {
    Style::default().fg(POSITIVE).add_modifier(Modifier::BOLD)
}

pub fn direction_color(direction: Direction) -> Color {
    match direction {
        Direction::Up => POSITIVE,
        Direction::Down => NEGATIVE,
    }
}

pub fn direction(direction: Direction) -> Style {
    Style::default()
        .fg(direction_color(direction))
        .add_modifier(Modifier::BOLD)
}

pub fn change(positive: bool) -> Style {
    if positive {
        self::positive()
    } else {
        negative()
    }
}

pub fn tag(tag: &str) -> Style {
    match tag {
        "HOT" => Style::default().fg(Color::Rgb(248, 113, 113)),
        _ => accent(),
    }
}

pub fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_colors() {
        assert_eq!(direction_color(Direction::Up), POSITIVE);
        assert_eq!(direction_color(Direction::Down), NEGATIVE);
    }

    #[test]
    fn tag_colors() {
        assert_eq!(tag("OTC"), accent());
        assert_ne!(tag("HOT"), accent());
    }

    #[test]
    fn rgb_maps_channels() {
        assert_eq!(rgb(Rgb(1, 2, 3)), Color::Rgb(1, 2, 3));
    }
}
