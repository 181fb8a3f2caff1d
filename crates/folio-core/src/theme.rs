//! Color themes for the page text.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Accent color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Indigo,
    Cyan,
    Violet,
    Amber,
    Rose,
}

impl ColorTheme {
    const ORDER: [ColorTheme; 5] = [
        ColorTheme::Indigo,
        ColorTheme::Cyan,
        ColorTheme::Violet,
        ColorTheme::Amber,
        ColorTheme::Rose,
    ];

    /// Primary accent color.
    pub fn color(self) -> Color {
        match self {
            ColorTheme::Indigo => Color::Rgb(129, 140, 248),
            ColorTheme::Cyan => Color::Rgb(34, 211, 238),
            ColorTheme::Violet => Color::Rgb(192, 132, 252),
            ColorTheme::Amber => Color::Rgb(251, 191, 36),
            ColorTheme::Rose => Color::Rgb(251, 113, 133),
        }
    }

    /// Secondary color for gradients and highlights.
    pub fn accent(self) -> Color {
        match self {
            ColorTheme::Indigo => Color::Rgb(168, 85, 247),
            ColorTheme::Cyan => Color::Rgb(59, 130, 246),
            ColorTheme::Violet => Color::Rgb(236, 72, 153),
            ColorTheme::Amber => Color::Rgb(249, 115, 22),
            ColorTheme::Rose => Color::Rgb(244, 63, 94),
        }
    }

    /// Cycle to the next theme.
    pub fn next(self) -> Self {
        let index = Self::ORDER.iter().position(|t| *t == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }
}
