/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math; `scale8(x, 255)` is `x`.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Dim an 8-bit value by an intensity, flooring the result
///
/// Unlike [`scale8`] this divides by 255 exactly, so `dim8(255, i) == i`.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn dim8(value: u8, intensity: u8) -> u8 {
    (value as u16 * intensity as u16 / 255) as u8
}

/// Convert a unit-range float to an 8-bit value, flooring and clamping
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unit8(value: f32) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    (value * 255.0).floor().clamp(0.0, 255.0) as u8
}
