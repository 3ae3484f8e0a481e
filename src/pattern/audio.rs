//! Audio-reactive generators
//!
//! Each generator runs either mono (both strips follow the channel mean) or
//! stereo (the left strip follows the left channel with a cool hue bias, the
//! right strip the right channel with a warm bias and, for a fixed color,
//! the color's complement).

use embassy_time::{Duration, Instant};

use super::{Pattern, RenderContext};
use crate::{
    amplitude::MAX_AMPLITUDE,
    bounds::{StripId, center_pair},
    color::{ColorSpec, complement, dim, hue_to_rgb, scale},
    frame::Frame,
    math8::unit8,
};

const AUDIO_TICK: Duration = Duration::from_millis(20);

/// Hue offset of the left strip in stereo rainbow mode
const COOL_BIAS: f32 = 0.7;
/// Hue offset of the right strip in stereo rainbow mode
const WARM_BIAS: f32 = 0.3;
/// Lowest color scale of the amplitude-scaled generators
const MIN_SCALE: f32 = 0.1;
/// Dimmest LED of a center bloom
const MIN_BLOOM_INTENSITY: i32 = 50;
/// Hue cycles per second
const PULSE_HUE_RATE: f64 = 0.1;
const BLOOM_HUE_RATE: f64 = 0.2;

/// Channel layout of an audio generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voices {
    Mono,
    Stereo,
}

/// What one strip follows for a tick
#[derive(Debug, Clone, Copy)]
struct Voice {
    amplitude: f32,
    color: ColorSpec,
    hue_bias: f32,
}

impl Voices {
    fn voice(self, strip: StripId, ctx: &RenderContext) -> Voice {
        let amplitude = ctx.amplitude_or_silent();
        match (self, strip) {
            (Self::Mono, _) => Voice {
                amplitude: amplitude.mean(),
                color: ctx.color,
                hue_bias: 0.0,
            },
            (Self::Stereo, StripId::Left) => Voice {
                amplitude: amplitude.left,
                color: ctx.color,
                hue_bias: COOL_BIAS,
            },
            (Self::Stereo, StripId::Right) => Voice {
                amplitude: amplitude.right,
                color: match ctx.color {
                    ColorSpec::Fixed(color) => ColorSpec::Fixed(complement(color)),
                    ColorSpec::Rainbow => ColorSpec::Rainbow,
                },
                hue_bias: WARM_BIAS,
            },
        }
    }
}

/// Fraction of the hue wheel travelled at `rate` cycles per second
#[allow(clippy::cast_possible_truncation)]
fn hue_drift(now: Instant, rate: f64) -> f32 {
    (now.as_millis() as f64 / 1000.0 * rate).rem_euclid(1.0) as f32
}

/// Number of lit LEDs for an amplitude: `floor(amplitude / 100 * count)`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lit_count(amplitude: f32, count: usize) -> usize {
    let lit = (amplitude / MAX_AMPLITUDE * count as f32).floor();
    if lit.is_finite() && lit > 0.0 {
        (lit as usize).min(count)
    } else {
        0
    }
}

/// Whole strip in the configured color, scaled by loudness
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactiveSolid;

impl Pattern for ReactiveSolid {
    const TICK_INTERVAL: Duration = AUDIO_TICK;

    fn render(&mut self, ctx: &RenderContext, frame: &mut Frame) {
        let level = ctx.amplitude_or_silent().mean() / MAX_AMPLITUDE;
        frame.fill(scale(ctx.color.base_or_white(), level.max(MIN_SCALE)));
    }
}

/// Bar graph growing from LED 0 with loudness
///
/// Lit LEDs brighten from half to full intensity along the bar. In stereo
/// rainbow mode the left bar sweeps blue to red and the right bar green to
/// yellow; with a fixed color the stereo bars are also scaled by loudness.
#[derive(Debug, Clone, Copy)]
pub struct LevelMeter {
    voices: Voices,
}

impl LevelMeter {
    pub const fn new(voices: Voices) -> Self {
        Self { voices }
    }
}

impl Pattern for LevelMeter {
    const TICK_INTERVAL: Duration = AUDIO_TICK;

    fn render(&mut self, ctx: &RenderContext, frame: &mut Frame) {
        for strip in StripId::ALL {
            let voice = self.voices.voice(strip, ctx);
            let leds = frame.strip_mut(strip);
            let count = leds.len();
            let lit = lit_count(voice.amplitude, count);

            for (i, led) in leds.iter_mut().enumerate().take(lit) {
                let position = i as f32 / count as f32;
                let ramp = 0.5 + 0.5 * position;
                *led = match (self.voices, voice.color) {
                    (Voices::Mono, ColorSpec::Rainbow) => hue_to_rgb(position, 255),
                    (Voices::Mono, ColorSpec::Fixed(color)) => dim(color, unit8(ramp)),
                    (Voices::Stereo, ColorSpec::Rainbow) => {
                        let hue = match strip {
                            StripId::Left => 0.7 - position * 0.7,
                            StripId::Right => 0.3 - position * 0.15,
                        };
                        hue_to_rgb(hue, unit8(ramp))
                    }
                    (Voices::Stereo, ColorSpec::Fixed(color)) => {
                        let level = ramp * voice.amplitude / MAX_AMPLITUDE;
                        scale(color, level.max(MIN_SCALE))
                    }
                };
            }
        }
    }
}

/// Whole strip pulsing with loudness
///
/// In rainbow mode the hue drifts with wall-clock time and loudness sets
/// the intensity.
#[derive(Debug, Clone, Copy)]
pub struct Pulse {
    voices: Voices,
}

impl Pulse {
    pub const fn new(voices: Voices) -> Self {
        Self { voices }
    }
}

impl Pattern for Pulse {
    const TICK_INTERVAL: Duration = AUDIO_TICK;

    fn render(&mut self, ctx: &RenderContext, frame: &mut Frame) {
        let drift = hue_drift(ctx.now, PULSE_HUE_RATE);
        for strip in StripId::ALL {
            let voice = self.voices.voice(strip, ctx);
            let level = voice.amplitude / MAX_AMPLITUDE;
            let leds = frame.strip_mut(strip);
            let count = leds.len();
            match voice.color {
                ColorSpec::Rainbow => {
                    let brightness = unit8(level);
                    for (i, led) in leds.iter_mut().enumerate() {
                        let hue = i as f32 / count as f32 + drift + voice.hue_bias;
                        *led = hue_to_rgb(hue, brightness);
                    }
                }
                ColorSpec::Fixed(color) => leds.fill(scale(color, level.max(MIN_SCALE))),
            }
        }
    }
}

/// Symmetric bar growing outward from the strip center
///
/// The radius is `floor(amplitude / 100 * (N / 2))`; intensity falls off
/// linearly with distance from the center, never below 50.
#[derive(Debug, Clone, Copy)]
pub struct CenterBloom {
    voices: Voices,
}

impl CenterBloom {
    pub const fn new(voices: Voices) -> Self {
        Self { voices }
    }
}

/// Intensity at `offset` LEDs from the center of a strip of `count` LEDs
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn bloom_intensity(offset: usize, count: usize) -> u8 {
    let half = count as f32 / 2.0;
    let falloff = if half > 0.0 {
        (255.0 * offset as f32 / half).floor() as i32
    } else {
        0
    };
    (255 - falloff).clamp(MIN_BLOOM_INTENSITY, 255) as u8
}

impl Pattern for CenterBloom {
    const TICK_INTERVAL: Duration = AUDIO_TICK;

    fn render(&mut self, ctx: &RenderContext, frame: &mut Frame) {
        let drift = hue_drift(ctx.now, BLOOM_HUE_RATE);
        for strip in StripId::ALL {
            let voice = self.voices.voice(strip, ctx);
            let count = frame.strip(strip).len();
            let Some((low, high)) = center_pair(count) else {
                continue;
            };
            let radius = lit_count(voice.amplitude, count / 2);

            for offset in 0..=radius {
                let intensity = bloom_intensity(offset, count);
                let color = match voice.color {
                    ColorSpec::Rainbow => {
                        let hue = offset as f32 / count as f32 + drift + voice.hue_bias;
                        hue_to_rgb(hue, intensity)
                    }
                    ColorSpec::Fixed(color) => dim(color, intensity),
                };
                let left = low.checked_sub(offset);
                let right = high + offset;
                if let Some(left) = left {
                    frame.set(strip, left, color);
                }
                if right < count && Some(right) != left {
                    frame.set(strip, right, color);
                }
            }
        }
    }
}
