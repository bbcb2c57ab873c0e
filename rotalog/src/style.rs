//! Terminal style attributes and their rendering through `nu-ansi-term`.

use nu_ansi_term::{Color as AnsiColor, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    Black,
    BlackBright,
    Blue,
    BlueBright,
    Cyan,
    CyanBright,
    #[serde(alias = "grey")]
    Gray,
    Green,
    GreenBright,
    Magenta,
    MagentaBright,
    Red,
    RedBright,
    White,
    WhiteBright,
    Yellow,
    YellowBright,
}

impl Color {
    fn ansi(self) -> AnsiColor {
        match self {
            Color::Black => AnsiColor::Black,
            Color::BlackBright | Color::Gray => AnsiColor::DarkGray,
            Color::Blue => AnsiColor::Blue,
            Color::BlueBright => AnsiColor::LightBlue,
            Color::Cyan => AnsiColor::Cyan,
            Color::CyanBright => AnsiColor::LightCyan,
            Color::Green => AnsiColor::Green,
            Color::GreenBright => AnsiColor::LightGreen,
            Color::Magenta => AnsiColor::Purple,
            Color::MagentaBright => AnsiColor::LightPurple,
            Color::Red => AnsiColor::Red,
            Color::RedBright => AnsiColor::LightRed,
            Color::White => AnsiColor::White,
            Color::WhiteBright => AnsiColor::LightGray,
            Color::Yellow => AnsiColor::Yellow,
            Color::YellowBright => AnsiColor::LightYellow,
        }
    }
}

/// Background colors. Serialized with a `bg` prefix (`bgBlue`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Background {
    #[serde(rename = "bgBlack")]
    Black,
    #[serde(rename = "bgBlackBright")]
    BlackBright,
    #[serde(rename = "bgBlue")]
    Blue,
    #[serde(rename = "bgBlueBright")]
    BlueBright,
    #[serde(rename = "bgCyan")]
    Cyan,
    #[serde(rename = "bgCyanBright")]
    CyanBright,
    #[serde(rename = "bgGray", alias = "bgGrey")]
    Gray,
    #[serde(rename = "bgGreen")]
    Green,
    #[serde(rename = "bgGreenBright")]
    GreenBright,
    #[serde(rename = "bgMagenta")]
    Magenta,
    #[serde(rename = "bgMagentaBright")]
    MagentaBright,
    #[serde(rename = "bgRed")]
    Red,
    #[serde(rename = "bgRedBright")]
    RedBright,
    #[serde(rename = "bgWhite")]
    White,
    #[serde(rename = "bgWhiteBright")]
    WhiteBright,
    #[serde(rename = "bgYellow")]
    Yellow,
    #[serde(rename = "bgYellowBright")]
    YellowBright,
}

impl Background {
    fn ansi(self) -> AnsiColor {
        let fg = match self {
            Background::Black => Color::Black,
            Background::BlackBright => Color::BlackBright,
            Background::Blue => Color::Blue,
            Background::BlueBright => Color::BlueBright,
            Background::Cyan => Color::Cyan,
            Background::CyanBright => Color::CyanBright,
            Background::Gray => Color::Gray,
            Background::Green => Color::Green,
            Background::GreenBright => Color::GreenBright,
            Background::Magenta => Color::Magenta,
            Background::MagentaBright => Color::MagentaBright,
            Background::Red => Color::Red,
            Background::RedBright => Color::RedBright,
            Background::White => Color::White,
            Background::WhiteBright => Color::WhiteBright,
            Background::Yellow => Color::Yellow,
            Background::YellowBright => Color::YellowBright,
        };
        fg.ansi()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Blink,
    Bold,
    Dim,
    DoubleUnderline,
    Framed,
    Hidden,
    Inverse,
    Italic,
    Overlined,
    Reset,
    Strikethrough,
    Underline,
}

impl Modifier {
    /// SGR open/close codes for modifiers `Style` has no builder for.
    fn raw_codes(self) -> Option<(u8, u8)> {
        match self {
            Modifier::DoubleUnderline => Some((21, 24)),
            Modifier::Framed => Some((51, 54)),
            Modifier::Overlined => Some((53, 55)),
            Modifier::Reset => Some((0, 0)),
            _ => None,
        }
    }

    fn apply(self, style: Style) -> Style {
        match self {
            Modifier::Blink => style.blink(),
            Modifier::Bold => style.bold(),
            Modifier::Dim => style.dimmed(),
            Modifier::Hidden => style.hidden(),
            Modifier::Inverse => style.reverse(),
            Modifier::Italic => style.italic(),
            Modifier::Strikethrough => style.strikethrough(),
            Modifier::Underline => style.underline(),
            _ => style,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSet {
    pub color: Option<Color>,
    pub background: Option<Background>,
    pub modifiers: Vec<Modifier>,
}

impl StyleSet {
    pub fn fg(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn is_plain(&self) -> bool {
        self.color.is_none() && self.background.is_none() && self.modifiers.is_empty()
    }

    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }

        let mut style = Style::new();
        if let Some(color) = self.color {
            style = style.fg(color.ansi());
        }
        if let Some(background) = self.background {
            style = style.on(background.ansi());
        }
        for modifier in &self.modifiers {
            style = modifier.apply(style);
        }

        let mut painted = if style.is_plain() {
            text.to_string()
        } else {
            style.paint(text).to_string()
        };
        for (open, close) in self.modifiers.iter().filter_map(|m| m.raw_codes()) {
            painted = format!("\x1b[{}m{}\x1b[{}m", open, painted, close);
        }
        painted
    }
}
