use crate::{
    color::Rgb,
    error::ColorError,
    math8::dim8,
};

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Map a hue position on the color wheel to RGB
///
/// The wheel is split into six 60° sectors, each a linear ramp of one
/// channel between two saturated primaries. `hue` wraps into `[0, 1)`;
/// the result is dimmed by `intensity` (255 = full).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hue_to_rgb(hue: f32, intensity: u8) -> Rgb {
    let hue = if hue.is_finite() { hue.rem_euclid(1.0) } else { 0.0 };
    let pos = hue * 6.0;
    let ramp = |x: f32| (x * 255.0).floor().clamp(0.0, 255.0) as u8;

    let (r, g, b) = if pos < 1.0 {
        (255, ramp(pos), 0)
    } else if pos < 2.0 {
        (ramp(2.0 - pos), 255, 0)
    } else if pos < 3.0 {
        (0, 255, ramp(pos - 2.0))
    } else if pos < 4.0 {
        (0, ramp(4.0 - pos), 255)
    } else if pos < 5.0 {
        (ramp(pos - 4.0), 0, 255)
    } else {
        (255, 0, ramp(6.0 - pos))
    };

    Rgb {
        r: dim8(r, intensity),
        g: dim8(g, intensity),
        b: dim8(b, intensity),
    }
}

/// Parse a `RRGGBB` or `#RRGGBB` hex string
pub fn hex_to_rgb(value: &str) -> Result<Rgb, ColorError> {
    let invalid = || ColorError::InvalidColorFormat(value.to_string());
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    u32::from_str_radix(hex, 16)
        .map(rgb_from_u32)
        .map_err(|_| invalid())
}

/// Format a color as lowercase `#rrggbb`
pub fn rgb_to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Multiply every channel by `factor`, flooring and capping to `[0, 255]`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale(color: Rgb, factor: f32) -> Rgb {
    let factor = if factor.is_finite() { factor } else { 0.0 };
    let channel = |c: u8| (f32::from(c) * factor).floor().clamp(0.0, 255.0) as u8;
    Rgb {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

/// Dim a color by an 8-bit intensity (255 = unchanged)
#[inline]
pub const fn dim(color: Rgb, intensity: u8) -> Rgb {
    Rgb {
        r: dim8(color.r, intensity),
        g: dim8(color.g, intensity),
        b: dim8(color.b, intensity),
    }
}

/// RGB complement, used for contrast between the two strips
#[inline]
pub const fn complement(color: Rgb) -> Rgb {
    Rgb {
        r: 255 - color.r,
        g: 255 - color.g,
        b: 255 - color.b,
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}
