// src/styles.rs

use serde::Serialize;

/// One theme's color tokens, as hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub background_second: &'static str,
    pub button_bg: &'static str,
    pub button_bg_profile: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_third: &'static str,
    pub button_text: &'static str,
    pub link: &'static str,
    pub error: &'static str,
}

pub const LIGHT: Palette = Palette {
    background: "#A0EACF",
    background_second: "#0F2A19",
    button_bg: "#0F2A19",
    button_bg_profile: "#9EB9A8",
    text_primary: "#000000",
    text_secondary: "#6C6C6C",
    text_third: "#A5AFA8",
    button_text: "#A0EACF",
    link: "#3B82F6",
    error: "#EF4444",
};

pub const DARK: Palette = Palette {
    background: "#0F2A19",
    background_second: "#A0EACF",
    button_bg: "#2C2C2C",
    button_bg_profile: "#3A3A3A",
    text_primary: "#FFFFFF",
    text_secondary: "#B0B0B0",
    text_third: "#8E8E8E",
    button_text: "#00FFB3",
    link: "#93C5FD",
    error: "#EF4444",
};

pub fn palette(dark: bool) -> Palette {
    if dark { DARK } else { LIGHT }
}

/// A resolved text style preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    pub font_size: u16,
    pub font_weight: u16,
    pub color: &'static str,
    pub italic: bool,
    pub underline: bool,
}

impl TextStyle {
    const fn plain(font_size: u16, font_weight: u16, color: &'static str) -> Self {
        Self {
            font_size,
            font_weight,
            color,
            italic: false,
            underline: false,
        }
    }
}

/// Text presets resolved against the active mode.
pub fn title(dark: bool) -> TextStyle {
    TextStyle::plain(40, 900, palette(dark).text_primary)
}

pub fn subtitle(dark: bool) -> TextStyle {
    TextStyle::plain(25, 800, palette(dark).text_primary)
}

pub fn body(dark: bool) -> TextStyle {
    TextStyle::plain(16, 400, palette(dark).text_primary)
}

pub fn body_secondary(dark: bool) -> TextStyle {
    TextStyle::plain(14, 400, palette(dark).text_secondary)
}

pub fn caption(dark: bool) -> TextStyle {
    TextStyle::plain(12, 400, palette(dark).text_third)
}

pub fn label(dark: bool) -> TextStyle {
    TextStyle::plain(16, 700, palette(dark).text_primary)
}

pub fn text_button(dark: bool) -> TextStyle {
    TextStyle::plain(17, 600, palette(dark).button_text)
}

pub fn link(dark: bool) -> TextStyle {
    TextStyle {
        underline: true,
        ..TextStyle::plain(15, 500, palette(dark).link)
    }
}

pub fn error_text(dark: bool) -> TextStyle {
    TextStyle::plain(14, 500, palette(dark).error)
}
