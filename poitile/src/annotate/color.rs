//! Marker and line colours.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a colour string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized color '{0}' (expected a name like 'red' or '#rrggbb[aa]')")]
pub struct ColorParseError(pub String);

/// An RGBA colour with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

const NAMED: &[(&str, Color)] = &[
    ("red", Color::RED),
    ("white", Color::WHITE),
    ("yellow", Color::YELLOW),
    ("black", Color::BLACK),
    ("blue", Color::BLUE),
    ("green", Color::GREEN),
    ("purple", Color::PURPLE),
];

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);

    /// Opaque colour from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns `true` if the colour has no transparency.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn to_rgba_u8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some((_, color)) = NAMED.iter().find(|(name, _)| *name == lower) {
            return Ok(*color);
        }

        let hex = lower
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError(trimmed.to_string()))?;
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .ok_or_else(|| ColorParseError(trimmed.to_string()))
        };

        match hex.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(ColorParseError(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, _)) = NAMED.iter().find(|(_, color)| color == self) {
            return write!(f, "{}", name);
        }
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}
