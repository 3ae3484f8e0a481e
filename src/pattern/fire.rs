use embassy_time::Duration;

use super::{LengthScoped, Pattern, RenderContext};
use crate::{bounds::StripId, color::Rgb, frame::Frame};

/// Largest random change applied to the two source cells
const SPARK: i16 = 40;
const COOLING: f32 = 0.8;
const FLICKER_MIN: f32 = 0.9;
const FLICKER_MAX: f32 = 1.1;
/// Green share of the heat, giving the red-to-yellow ramp
const GREEN_RATIO: f32 = 0.4;

/// Heat simulation rising from the far end of the strip
///
/// The two lowest cells wander randomly; every higher cell takes the cooled,
/// flickering average of the two cells below it. Cell 0 sits at the last
/// physical LED so the flame appears to rise.
#[derive(Debug, Clone)]
pub struct Fire {
    heat: [LengthScoped<Vec<u8>>; 2],
    rng: fastrand::Rng,
}

impl Default for Fire {
    fn default() -> Self {
        Self {
            heat: Default::default(),
            rng: fastrand::Rng::new(),
        }
    }
}

impl Fire {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            heat: Default::default(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Heat per cell after the last tick, cell 0 first
    pub fn heat(&self, strip: StripId) -> Option<&[u8]> {
        self.heat[strip.index()].get().map(Vec::as_slice)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn step(heat: &mut [u8], rng: &mut fastrand::Rng) {
    for cell in heat.iter_mut().take(2) {
        let value = i16::from(*cell) + rng.i16(-SPARK..=SPARK);
        *cell = value.clamp(0, 255) as u8;
    }
    for i in 2..heat.len() {
        let below = (f32::from(heat[i - 1]) + f32::from(heat[i - 2])) / 2.0;
        let flicker = FLICKER_MIN + rng.f32() * (FLICKER_MAX - FLICKER_MIN);
        heat[i] = (below * COOLING * flicker).floor().clamp(0.0, 255.0) as u8;
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn heat_color(heat: u8) -> Rgb {
    Rgb {
        r: heat,
        g: (f32::from(heat) * GREEN_RATIO).floor() as u8,
        b: 0,
    }
}

impl Pattern for Fire {
    const TICK_INTERVAL: Duration = Duration::from_millis(30);

    fn render(&mut self, _ctx: &RenderContext, frame: &mut Frame) {
        for strip in StripId::ALL {
            let leds = frame.strip_mut(strip);
            let heat = self.heat[strip.index()].get_or_init(leds.len(), |n| vec![0; n]);
            step(heat, &mut self.rng);
            for (led, cell) in leds.iter_mut().rev().zip(heat.iter()) {
                *led = heat_color(*cell);
            }
        }
    }

    fn reset(&mut self) {
        self.heat.iter_mut().for_each(LengthScoped::clear);
    }
}
