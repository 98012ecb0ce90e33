//! Color specs and the palette of display roles.
//!
//! A spec is a `_`-joined list of tokens: attributes first, then an optional
//! foreground color, then optionally `on_` and a background color. Colors may
//! carry a `bright_` prefix. Examples: `white`, `bold_bright_white`,
//! `bright_white_on_blue`, `bold_underline_bright_white`, `normal`.

use std::iter::Peekable;

use ratatui::style::{Color, Modifier, Style};
use horoscope_models::ColorConfig;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StyleError {
    #[error("{option}: unknown token {token:?} in color spec {spec:?}")]
    UnknownToken {
        option: String,
        spec: String,
        token: String,
    },

    #[error("{option}: color spec {spec:?} ends early")]
    Incomplete { option: String, spec: String },
}

/// What a piece of text is, independent of how it is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Normal,
    PromptLowlight,
    PromptHighlight,
    LightbarBorder,
    LightbarLowlight,
    LightbarHighlight,
    HeaderHighlight,
    HeaderLowlight,
    TextHighlight,
    TextLowlight,
    Error,
}

/// Resolved styles for every role.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    prompt_lowlight: Style,
    prompt_highlight: Style,
    lightbar_border: Style,
    lightbar_lowlight: Style,
    lightbar_highlight: Style,
    header_highlight: Style,
    header_lowlight: Style,
    text_highlight: Style,
    text_lowlight: Style,
    error: Style,
}

impl Palette {
    /// Resolve every configured color option, failing on the first bad spec.
    pub fn from_config(colors: &ColorConfig) -> Result<Self, StyleError> {
        let style = |option: &str, spec: &str| parse_style(spec).map_err(|e| e.for_option(option));
        Ok(Self {
            prompt_lowlight: style("prompt_lowlight_color", &colors.prompt_lowlight_color)?,
            prompt_highlight: style("prompt_highlight_color", &colors.prompt_highlight_color)?,
            lightbar_border: style("lightbar_border_color", &colors.lightbar_border_color)?,
            lightbar_lowlight: style("lightbar_lowlight_color", &colors.lightbar_lowlight_color)?,
            lightbar_highlight: style(
                "lightbar_highlight_color",
                &colors.lightbar_highlight_color,
            )?,
            header_highlight: style("header_highlight_color", &colors.header_highlight_color)?,
            header_lowlight: style("header_lowlight_color", &colors.header_lowlight_color)?,
            text_highlight: style("text_highlight_color", &colors.text_highlight_color)?,
            text_lowlight: style("text_lowlight_color", &colors.text_lowlight_color)?,
            error: style("error_color", &colors.error_color)?,
        })
    }

    pub fn style(&self, role: Role) -> Style {
        match role {
            Role::Normal => Style::new(),
            Role::PromptLowlight => self.prompt_lowlight,
            Role::PromptHighlight => self.prompt_highlight,
            Role::LightbarBorder => self.lightbar_border,
            Role::LightbarLowlight => self.lightbar_lowlight,
            Role::LightbarHighlight => self.lightbar_highlight,
            Role::HeaderHighlight => self.header_highlight,
            Role::HeaderLowlight => self.header_lowlight,
            Role::TextHighlight => self.text_highlight,
            Role::TextLowlight => self.text_lowlight,
            Role::Error => self.error,
        }
    }
}

impl StyleError {
    fn for_option(self, option: &str) -> Self {
        match self {
            StyleError::UnknownToken { spec, token, .. } => StyleError::UnknownToken {
                option: option.to_string(),
                spec,
                token,
            },
            StyleError::Incomplete { spec, .. } => StyleError::Incomplete {
                option: option.to_string(),
                spec,
            },
        }
    }
}

fn modifier(token: &str) -> Option<Modifier> {
    match token {
        "bold" => Some(Modifier::BOLD),
        "dim" => Some(Modifier::DIM),
        "italic" => Some(Modifier::ITALIC),
        "underline" => Some(Modifier::UNDERLINED),
        "blink" => Some(Modifier::SLOW_BLINK),
        "reverse" => Some(Modifier::REVERSED),
        _ => None,
    }
}

/// The eight ANSI colors and their bright variants.
fn color(token: &str, bright: bool) -> Option<Color> {
    let color = match (token, bright) {
        ("black", false) => Color::Black,
        ("black", true) => Color::DarkGray,
        ("red", false) => Color::Red,
        ("red", true) => Color::LightRed,
        ("green", false) => Color::Green,
        ("green", true) => Color::LightGreen,
        ("yellow", false) => Color::Yellow,
        ("yellow", true) => Color::LightYellow,
        ("blue", false) => Color::Blue,
        ("blue", true) => Color::LightBlue,
        ("magenta", false) => Color::Magenta,
        ("magenta", true) => Color::LightMagenta,
        ("cyan", false) => Color::Cyan,
        ("cyan", true) => Color::LightCyan,
        ("white", false) => Color::Gray,
        ("white", true) => Color::White,
        _ => return None,
    };
    Some(color)
}

fn unknown(spec: &str, token: &str) -> StyleError {
    StyleError::UnknownToken {
        option: String::new(),
        spec: spec.to_string(),
        token: token.to_string(),
    }
}

fn incomplete(spec: &str) -> StyleError {
    StyleError::Incomplete {
        option: String::new(),
        spec: spec.to_string(),
    }
}

/// Read `[bright_]<color>` from the front of `tokens`.
fn read_color<'a>(
    tokens: &mut Peekable<impl Iterator<Item = &'a str>>,
    spec: &str,
) -> Result<Color, StyleError> {
    let first = tokens.next().ok_or_else(|| incomplete(spec))?;
    if first == "bright" {
        let name = tokens.next().ok_or_else(|| incomplete(spec))?;
        color(name, true).ok_or_else(|| unknown(spec, name))
    } else {
        color(first, false).ok_or_else(|| unknown(spec, first))
    }
}

/// Parse one color spec. `option` in errors is left empty; `Palette` fills it in.
pub fn parse_style(spec: &str) -> Result<Style, StyleError> {
    let mut style = Style::new();
    let trimmed = spec.trim();
    if trimmed.is_empty() || trimmed == "normal" {
        return Ok(style);
    }

    let mut tokens = trimmed.split('_').peekable();

    while let Some(attr) = tokens.peek().and_then(|t| modifier(t)) {
        style = style.add_modifier(attr);
        tokens.next();
    }

    if tokens.peek().is_some_and(|t| *t != "on") {
        style = style.fg(read_color(&mut tokens, spec)?);
    }

    if let Some(token) = tokens.next() {
        if token != "on" {
            return Err(unknown(spec, token));
        }
        style = style.bg(read_color(&mut tokens, spec)?);
    }

    if let Some(token) = tokens.next() {
        return Err(unknown(spec, token));
    }

    Ok(style)
}
