use colored::Color;
use std::borrow::Cow;

/// A foreground color plus an optional bold weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    color: Option<Color>,
    bold: bool,
}

impl Style {
    pub const DEFAULT: Style = Style::plain(None);
    pub const BOLD: Style = Style::DEFAULT.bold();
    pub const RED: Style = Style::plain(Some(Color::BrightRed));
    pub const GREEN: Style = Style::plain(Some(Color::Green));
    pub const YELLOW: Style = Style::plain(Some(Color::Yellow));
    pub const CYAN: Style = Style::plain(Some(Color::Cyan));
    pub const GRAY: Style = Style::plain(Some(Color::BrightBlack));
    pub const LIGHT_GRAY: Style = Style::plain(Some(Color::White));

    const fn plain(color: Option<Color>) -> Self {
        Style { color, bold: false }
    }

    pub const fn bold(self) -> Self {
        Style {
            color: self.color,
            bold: true,
        }
    }
}

/// Styles for nesting levels, indexed by `level % 2`.
pub const ALTERNATING_STYLES: [Style; 2] = [Style::DEFAULT, Style::GRAY];

/// Applies styles only when color output was requested at construction.
///
/// The flag alone decides: a disabled colorizer returns its input untouched,
/// an enabled one always writes SGR sequences, whatever the terminal or
/// `NO_COLOR`/`CLICOLOR` say.
#[derive(Debug, Clone, Copy)]
pub struct Colorizer {
    enabled: bool,
}

impl Colorizer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, style: Style, text: impl AsRef<str>) -> String {
        let text = text.as_ref();
        if !self.enabled {
            return text.to_string();
        }

        let mut codes: Vec<Cow<'static, str>> = Vec::with_capacity(2);
        if style.bold {
            codes.push("1".into());
        }
        if let Some(color) = style.color {
            codes.push(color.to_fg_str());
        }
        if codes.is_empty() {
            return text.to_string();
        }
        format!("\x1b[{}m{}\x1b[0m", codes.join(";"), text)
    }
}
