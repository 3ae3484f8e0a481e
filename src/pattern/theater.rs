//! Theater Chase and Random Chase
//!
//! Both draw solid blocks of one color instead of fading pulses. The color
//! of a pass comes from the pattern's own seeded generator, so tests can
//! pin it with `with_seed`.

use embassy_time::Duration;

use super::{LengthScoped, Pattern, RenderContext};
use crate::{
    bounds::StripId,
    color::{ColorSpec, Rgb, hue_to_rgb},
    frame::Frame,
};

/// Every `THEATER_SPACING`th LED is lit
pub const THEATER_SPACING: usize = 3;
/// LEDs lit around the Random Chase cursor
pub const CHASE_BLOCK: usize = 3;

fn random_color(rng: &mut fastrand::Rng) -> Rgb {
    hue_to_rgb(rng.f32(), 255)
}

/// Marquee lights: every third LED lit, shifting by one each tick
///
/// A fixed color is drawn as configured. With a rainbow configuration the
/// pattern picks one random color and keeps it until reset.
#[derive(Debug, Clone)]
pub struct TheaterChase {
    step: usize,
    color: Option<Rgb>,
    rng: fastrand::Rng,
}

impl Default for TheaterChase {
    fn default() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }
}

impl TheaterChase {
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            step: 0,
            color: None,
            rng,
        }
    }

    /// Offset drawn by the next tick, in `0..THEATER_SPACING`
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Random color picked for a rainbow configuration
    pub const fn color(&self) -> Option<Rgb> {
        self.color
    }
}

impl Pattern for TheaterChase {
    const TICK_INTERVAL: Duration = Duration::from_millis(50);

    fn render(&mut self, ctx: &RenderContext, frame: &mut Frame) {
        let color = match ctx.color {
            ColorSpec::Fixed(color) => color,
            ColorSpec::Rainbow => *self.color.get_or_insert_with(|| random_color(&mut self.rng)),
        };
        for strip in StripId::ALL {
            frame
                .strip_mut(strip)
                .iter_mut()
                .skip(self.step)
                .step_by(THEATER_SPACING)
                .for_each(|led| *led = color);
        }
        self.step = (self.step + 1) % THEATER_SPACING;
    }

    fn reset(&mut self) {
        self.step = 0;
        self.color = None;
    }
}

/// Cursor of one Random Chase pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChasePass {
    pub position: usize,
    pub color: Rgb,
}

/// A three-LED block running along each strip in a random color
///
/// The block covers the cursor and one LED either side, clipped to the
/// strip. When the cursor runs off the end it wraps to zero and a new
/// color is drawn.
#[derive(Debug, Clone)]
pub struct RandomChase {
    passes: [LengthScoped<ChasePass>; 2],
    rng: fastrand::Rng,
}

impl Default for RandomChase {
    fn default() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }
}

impl RandomChase {
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            passes: Default::default(),
            rng,
        }
    }

    /// Cursor the next tick draws on `strip`
    pub fn pass(&self, strip: StripId) -> Option<ChasePass> {
        self.passes[strip.index()].get().copied()
    }
}

impl Pattern for RandomChase {
    const TICK_INTERVAL: Duration = Duration::from_millis(100);

    fn render(&mut self, _ctx: &RenderContext, frame: &mut Frame) {
        for strip in StripId::ALL {
            let leds = frame.strip_mut(strip);
            let count = leds.len();
            if count == 0 {
                continue;
            }
            let rng = &mut self.rng;
            let pass = self.passes[strip.index()].get_or_init(count, |_| ChasePass {
                position: 0,
                color: random_color(rng),
            });

            let start = pass.position.saturating_sub(1);
            let end = (pass.position + CHASE_BLOCK - 1).min(count);
            leds[start..end].fill(pass.color);

            pass.position += 1;
            if pass.position >= count {
                pass.position = 0;
                pass.color = random_color(rng);
            }
        }
    }

    fn reset(&mut self) {
        self.passes.iter_mut().for_each(LengthScoped::clear);
    }
}
