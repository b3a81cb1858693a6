//! Light and dark colour palettes.

use ratatui::style::Color;

/// Colour scheme for the board and chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Dark text on a light background.
    #[default]
    Light,
    /// Light text on a dark background.
    Dark,
}

/// Concrete colours for one [`Theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background.
    pub background: Color,
    /// Default text and borders.
    pub foreground: Color,
    /// Dimmed text (empty squares, help line).
    pub muted: Color,
    /// X marks.
    pub x: Color,
    /// O marks.
    pub o: Color,
    /// Background of squares on the winning line.
    pub winning: Color,
    /// Background of the cursor square.
    pub cursor: Color,
}

impl Theme {
    /// Switches between light and dark.
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Colours for this theme.
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                background: Color::White,
                foreground: Color::Black,
                muted: Color::Gray,
                x: Color::Blue,
                o: Color::Red,
                winning: Color::Cyan,
                cursor: Color::Yellow,
            },
            Self::Dark => Palette {
                background: Color::Black,
                foreground: Color::White,
                muted: Color::DarkGray,
                x: Color::LightBlue,
                o: Color::LightRed,
                winning: Color::Rgb(8, 217, 214),
                cursor: Color::DarkGray,
            },
        }
    }
}
