use embassy_time::Duration;

use super::{LengthScoped, Pattern, RenderContext};
use crate::{
    bounds::StripId,
    color::{ColorSpec, dim, hue_to_rgb},
    frame::Frame,
};

/// Chance that a dark LED ignites on a tick
const DROP_CHANCE: f32 = 0.1;
const MIN_DECAY: u8 = 5;
const MAX_DECAY: u8 = 15;

/// Random drops that flare to full intensity and fade out
///
/// Each tick a dark LED ignites with probability `DROP_CHANCE`; every lit
/// LED is drawn at its current intensity and then loses 5..=15.
#[derive(Debug, Clone)]
pub struct MatrixRain {
    intensities: [LengthScoped<Vec<u8>>; 2],
    drop_chance: f32,
    rng: fastrand::Rng,
}

impl Default for MatrixRain {
    fn default() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }
}

impl MatrixRain {
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            intensities: Default::default(),
            drop_chance: DROP_CHANCE,
            rng,
        }
    }

    /// Override the ignition probability (clamped to `[0, 1]`)
    #[must_use]
    pub fn with_drop_chance(mut self, chance: f32) -> Self {
        self.drop_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Per-LED intensities after the last tick
    pub fn intensities(&self, strip: StripId) -> Option<&[u8]> {
        self.intensities[strip.index()].get().map(Vec::as_slice)
    }
}

impl Pattern for MatrixRain {
    const TICK_INTERVAL: Duration = Duration::from_millis(50);

    fn render(&mut self, ctx: &RenderContext, frame: &mut Frame) {
        for strip in StripId::ALL {
            let leds = frame.strip_mut(strip);
            let count = leds.len();
            let drops = self.intensities[strip.index()].get_or_init(count, |n| vec![0; n]);

            for drop in drops.iter_mut() {
                if *drop == 0 && self.rng.f32() < self.drop_chance {
                    *drop = u8::MAX;
                }
            }

            for (i, (led, drop)) in leds.iter_mut().zip(drops.iter_mut()).enumerate() {
                if *drop == 0 {
                    continue;
                }
                let base = match ctx.color {
                    ColorSpec::Fixed(color) => color,
                    ColorSpec::Rainbow => hue_to_rgb(i as f32 / count as f32, 255),
                };
                *led = dim(base, *drop);
                *drop = drop.saturating_sub(self.rng.u8(MIN_DECAY..=MAX_DECAY));
            }
        }
    }

    fn reset(&mut self) {
        self.intensities.iter_mut().for_each(LengthScoped::clear);
    }
}
