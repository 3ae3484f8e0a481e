use core::fmt;

use crate::{
    color::{Rgb, WHITE, hex_to_rgb, rgb_to_hex},
    error::ColorError,
};

const RAINBOW_NAME: &str = "rainbow";

const COLOR_NAME_RED: &str = "red";
const COLOR_NAME_GREEN: &str = "green";
const COLOR_NAME_BLUE: &str = "blue";
const COLOR_NAME_PURPLE: &str = "purple";
const COLOR_NAME_YELLOW: &str = "yellow";

/// Color names accepted alongside hex strings
const NAMED_COLORS: [(&str, Rgb); 5] = [
    (COLOR_NAME_RED, Rgb { r: 255, g: 0, b: 0 }),
    (COLOR_NAME_GREEN, Rgb { r: 0, g: 255, b: 0 }),
    (COLOR_NAME_BLUE, Rgb { r: 0, g: 0, b: 255 }),
    (COLOR_NAME_PURPLE, Rgb { r: 128, g: 0, b: 128 }),
    (COLOR_NAME_YELLOW, Rgb { r: 255, g: 255, b: 0 }),
];

/// Look up a color name, ignoring ASCII case
pub fn named_color(name: &str) -> Option<Rgb> {
    NAMED_COLORS
        .iter()
        .find(|(known, _)| name.eq_ignore_ascii_case(known))
        .map(|(_, color)| *color)
}

/// Configured base color of the strips
///
/// Either a fixed color or the rainbow sentinel, in which case generators
/// pick a position- or time-dependent hue instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpec {
    Fixed(Rgb),
    #[default]
    Rainbow,
}

impl ColorSpec {
    /// Parse `"rainbow"`, a color name or a hex color string
    ///
    /// Names are case-insensitive; anything else must be hex.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let value = value.trim();
        if value.eq_ignore_ascii_case(RAINBOW_NAME) {
            return Ok(Self::Rainbow);
        }
        if let Some(color) = named_color(value) {
            return Ok(Self::Fixed(color));
        }
        hex_to_rgb(value).map(Self::Fixed)
    }

    pub const fn is_rainbow(self) -> bool {
        matches!(self, Self::Rainbow)
    }

    /// Fixed color, or white for the rainbow sentinel
    pub const fn base_or_white(self) -> Rgb {
        match self {
            Self::Fixed(color) => color,
            Self::Rainbow => WHITE,
        }
    }
}

impl From<Rgb> for ColorSpec {
    fn from(color: Rgb) -> Self {
        Self::Fixed(color)
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(color) => f.write_str(&rgb_to_hex(*color)),
            Self::Rainbow => f.write_str(RAINBOW_NAME),
        }
    }
}
