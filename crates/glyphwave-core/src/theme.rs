//! Foreground color themes.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Foreground color the glyphs are drawn with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTheme {
    #[default]
    Cyan,
    Green,
    Amber,
    Magenta,
    White,
}

impl ColorTheme {
    /// All themes in cycling order.
    pub const ALL: [ColorTheme; 5] = [
        ColorTheme::Cyan,
        ColorTheme::Green,
        ColorTheme::Amber,
        ColorTheme::Magenta,
        ColorTheme::White,
    ];

    /// The ratatui color for this theme.
    pub fn color(self) -> Color {
        match self {
            ColorTheme::Cyan => Color::Rgb(94, 234, 212),
            ColorTheme::Green => Color::Rgb(134, 239, 172),
            ColorTheme::Amber => Color::Rgb(252, 211, 77),
            ColorTheme::Magenta => Color::Rgb(240, 171, 252),
            ColorTheme::White => Color::Rgb(229, 231, 235),
        }
    }

    /// Advance to the next theme, wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_visits_every_theme() {
        let mut theme = ColorTheme::default();
        for _ in 0..ColorTheme::ALL.len() {
            theme = theme.next();
        }
        assert_eq!(theme, ColorTheme::default());
    }
}
