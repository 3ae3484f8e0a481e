//! Rainbow cycling generator
//!
//! Spreads the full wheel across each strip and rotates it one step per
//! tick.

use embassy_time::Duration;

use super::{Pattern, RenderContext};
use crate::{bounds::StripId, color::hue_to_rgb, frame::Frame};

/// Positions on the wheel
const WHEEL_STEPS: usize = 256;

#[derive(Debug, Clone, Default)]
pub struct RainbowCycle {
    step: usize,
}

impl RainbowCycle {
    /// Current rotation, in `[0, 256)`
    pub const fn step(&self) -> usize {
        self.step
    }
}

impl Pattern for RainbowCycle {
    const TICK_INTERVAL: Duration = Duration::from_millis(20);

    fn render(&mut self, _ctx: &RenderContext, frame: &mut Frame) {
        for strip in StripId::ALL {
            let leds = frame.strip_mut(strip);
            let count = leds.len();
            for (i, led) in leds.iter_mut().enumerate() {
                let position = (i * WHEEL_STEPS / count + self.step) % WHEEL_STEPS;
                *led = hue_to_rgb(position as f32 / WHEEL_STEPS as f32, 255);
            }
        }
        self.step = (self.step + 1) % WHEEL_STEPS;
    }

    fn reset(&mut self) {
        self.step = 0;
    }
}
