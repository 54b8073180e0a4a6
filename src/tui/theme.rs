//! TUI theming support.
//!
//! Light and dark palettes, plus automatic selection from the terminal
//! environment.

use ratatui::style::Color;

use crate::cli::ThemeArg;

/// A collection of colors used for TUI components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Borders, headers, column titles
    pub primary: Color,
    /// Search input text and key hints
    pub secondary: Color,
    /// Degraded-state messages
    pub danger: Color,
    /// Hash column
    pub accent: Color,
    /// Secondary text, placeholders
    pub dim: Color,
    /// Main text
    pub normal: Color,
}

impl Theme {
    /// High-contrast dark theme (default).
    pub fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Yellow,
            danger: Color::Red,
            accent: Color::Green,
            dim: Color::DarkGray,
            normal: Color::White,
        }
    }

    /// High-contrast light theme.
    pub fn light() -> Self {
        Self {
            primary: Color::Blue,
            secondary: Color::Magenta,
            danger: Color::Red,
            accent: Color::Green,
            dim: Color::Gray,
            normal: Color::Black,
        }
    }

    /// Detect terminal theme or return dark theme as default.
    pub fn auto() -> Self {
        if is_light_terminal() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Resolve a configured theme choice.
    pub fn from_arg(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Auto => Self::auto(),
            ThemeArg::Dark => Self::dark(),
            ThemeArg::Light => Self::light(),
        }
    }

    /// Check if this is a light theme.
    pub fn is_light(&self) -> bool {
        self.normal == Color::Black
    }
}

/// Guess whether the terminal background is light.
///
/// COLORFGBG ("fg;bg") is set by rxvt, xterm and konsole.
fn is_light_terminal() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| value.rsplit(';').next().and_then(|bg| bg.parse::<u32>().ok()))
        // 0=black, 7=gray, 8=dark gray, 15=white
        .is_some_and(|bg| bg >= 7 && bg != 8)
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
