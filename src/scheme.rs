//! Built-in color schemes.
//!
//! A scheme is a fixed palette: primary and accent colors, a gradient sequence
//! used to color categories in order, and two text colors. The hex values are
//! a compatibility surface with previously generated slides and must not be
//! altered.
//!
//! Schemes live in `static` storage and are handed out by reference, so a
//! layout can never change the palette another layout sees.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ConfigError;

/// An opaque sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::hex("#FFFFFF");
    pub const BLACK: Color = Color::hex("#000000");

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` at compile time. Invalid input fails const evaluation.
    pub const fn hex(s: &str) -> Self {
        let bytes = s.as_bytes();
        assert!(bytes.len() == 7 && bytes[0] == b'#', "expected #RRGGBB");
        Self {
            r: hex_pair(bytes[1], bytes[2]),
            g: hex_pair(bytes[3], bytes[4]),
            b: hex_pair(bytes[5], bytes[6]),
        }
    }

    /// Runtime counterpart of [`Color::hex`].
    pub fn from_hex(s: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor {
            value: s.to_string(),
        };
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

const fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit"),
    }
}

const fn hex_pair(hi: u8, lo: u8) -> u8 {
    hex_digit(hi) * 16 + hex_digit(lo)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Named immutable palette.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ColorScheme {
    /// Registry key, e.g. `gold_blue`.
    pub key: &'static str,
    /// Human-readable name used in default titles.
    pub name: &'static str,
    pub primary: Color,
    pub accent: Color,
    pub accent2: Option<Color>,
    pub accent3: Option<Color>,
    /// Category colors, cycled by index. Never empty.
    pub gradient: &'static [Color],
    pub text: Color,
    pub text_light: Color,
    pub background: Color,
}

impl ColorScheme {
    /// Gradient color for category `idx`, wrapping around.
    pub fn gradient_color(&self, idx: usize) -> Color {
        self.gradient[idx % self.gradient.len()]
    }

    /// Primary for even indices, accent for odd ones.
    pub fn alternating(&self, idx: usize) -> Color {
        if idx % 2 == 0 {
            self.primary
        } else {
            self.accent
        }
    }
}

pub static BLUE: ColorScheme = ColorScheme {
    key: "blue",
    name: "Tech Blue",
    primary: Color::hex("#4A90E2"),
    accent: Color::hex("#FF6B6B"),
    accent2: None,
    accent3: None,
    gradient: &[
        Color::hex("#4A90E2"),
        Color::hex("#5B7FCE"),
        Color::hex("#6D6FBB"),
        Color::hex("#7E5FA8"),
    ],
    text: Color::hex("#2C3E50"),
    text_light: Color::hex("#7F8C8D"),
    background: Color::hex("#ECF0F1"),
};

pub static ORANGE: ColorScheme = ColorScheme {
    key: "orange",
    name: "Business Orange",
    primary: Color::hex("#FF9500"),
    accent: Color::hex("#4ECDC4"),
    accent2: None,
    accent3: None,
    gradient: &[
        Color::hex("#FF9500"),
        Color::hex("#FFA733"),
        Color::hex("#FFB966"),
        Color::hex("#FFCB99"),
    ],
    text: Color::hex("#34495E"),
    text_light: Color::hex("#95A5A6"),
    background: Color::hex("#F7F9FA"),
};

pub static GREEN: ColorScheme = ColorScheme {
    key: "green",
    name: "Professional Green",
    primary: Color::hex("#00D084"),
    accent: Color::hex("#FDCB6E"),
    accent2: None,
    accent3: None,
    gradient: &[
        Color::hex("#00D084"),
        Color::hex("#33D99A"),
        Color::hex("#66E2B0"),
        Color::hex("#99EBC6"),
    ],
    text: Color::hex("#2D3436"),
    text_light: Color::hex("#636E72"),
    background: Color::hex("#DFE6E9"),
};

pub static GOLD_BLUE: ColorScheme = ColorScheme {
    key: "gold_blue",
    name: "Premium Gold Blue",
    primary: Color::hex("#2C5282"),
    accent: Color::hex("#D4AF37"),
    accent2: Some(Color::hex("#F4E4C1")),
    accent3: None,
    gradient: &[
        Color::hex("#1E3A5F"),
        Color::hex("#2C5282"),
        Color::hex("#3A6FA5"),
    ],
    text: Color::hex("#2D3436"),
    text_light: Color::hex("#636E72"),
    background: Color::hex("#F5F6FA"),
};

pub static MULTILAYER: ColorScheme = ColorScheme {
    key: "multilayer",
    name: "Multilayer Professional",
    primary: Color::hex("#2C5282"),
    accent: Color::hex("#FF9500"),
    accent2: Some(Color::hex("#D4AF37")),
    accent3: Some(Color::hex("#8B4513")),
    gradient: &[
        Color::hex("#2C5282"),
        Color::hex("#3A6FA5"),
        Color::hex("#5A8FC4"),
    ],
    text: Color::hex("#2D3436"),
    text_light: Color::hex("#636E72"),
    background: Color::hex("#F5F6FA"),
};

static REGISTRY: [&ColorScheme; 5] = [&BLUE, &ORANGE, &GREEN, &GOLD_BLUE, &MULTILAYER];

/// All built-in schemes in registry order.
pub fn all() -> &'static [&'static ColorScheme] {
    &REGISTRY
}

/// Look up a scheme by key (case-insensitive, surrounding whitespace ignored).
pub fn resolve(name: &str) -> Result<&'static ColorScheme, ConfigError> {
    let wanted = name.trim().to_ascii_lowercase();
    REGISTRY
        .iter()
        .copied()
        .find(|s| s.key == wanted)
        .ok_or_else(|| ConfigError::UnknownScheme {
            name: name.to_string(),
            known: REGISTRY.iter().map(|s| s.key).collect::<Vec<_>>().join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_upper_case() {
        let c = Color::hex("#4a90e2");
        assert_eq!((c.r, c.g, c.b), (0x4A, 0x90, 0xE2));
        assert_eq!(c.to_string(), "#4A90E2");
    }

    #[test]
    fn runtime_parser_rejects_garbage() {
        assert!(Color::from_hex("4A90E2").is_err());
        assert!(Color::from_hex("#4A90E").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert_eq!(Color::from_hex(" #ff6b6b ").unwrap(), Color::hex("#FF6B6B"));
    }

    #[test]
    fn every_gradient_is_non_empty() {
        for s in all() {
            assert!(!s.gradient.is_empty(), "{} has an empty gradient", s.key);
        }
    }
}
