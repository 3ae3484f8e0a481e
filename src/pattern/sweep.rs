//! Moving pulse generators
//!
//! Ping-Pong, Dual Pulse and Chase all draw the same short pulse: full
//! color at its position, fading linearly to nothing `PULSE_WIDTH` LEDs
//! away. They differ only in how the pulse moves between ticks.

use embassy_time::Duration;

use super::{LengthScoped, Pattern, RenderContext};
use crate::{
    bounds::StripId,
    color::{ColorSpec, Rgb, hue_to_rgb, scale},
    frame::Frame,
};

/// Width of a pulse in LEDs
pub const PULSE_WIDTH: usize = 3;

/// Color of LED `index` lying `distance` LEDs away from a pulse center
fn pulse_pixel(color: ColorSpec, index: usize, count: usize, distance: usize) -> Option<Rgb> {
    if distance >= PULSE_WIDTH {
        return None;
    }
    let intensity = 1.0 - distance as f32 / PULSE_WIDTH as f32;
    let base = match color {
        ColorSpec::Fixed(color) => color,
        ColorSpec::Rainbow => hue_to_rgb(index as f32 / count as f32, 255),
    };
    Some(scale(base, intensity))
}

fn draw_pulse(color: ColorSpec, leds: &mut [Rgb], distance_of: impl Fn(usize) -> usize) {
    let count = leds.len();
    for (i, led) in leds.iter_mut().enumerate() {
        if let Some(pixel) = pulse_pixel(color, i, count, distance_of(i)) {
            *led = pixel;
        }
    }
}

/// Position of a pulse bouncing between both ends of a strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingPongCursor {
    position: usize,
    forward: bool,
}

impl Default for PingPongCursor {
    fn default() -> Self {
        Self {
            position: 0,
            forward: true,
        }
    }
}

impl PingPongCursor {
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Move one LED, reflecting at `0` and `count - 1`
    pub fn advance(&mut self, count: usize) {
        if count <= 1 {
            self.position = 0;
            return;
        }
        let last = count - 1;
        self.position = if self.forward {
            (self.position + 1).min(last)
        } else {
            self.position.saturating_sub(1)
        };
        if self.position >= last {
            self.forward = false;
        } else if self.position == 0 {
            self.forward = true;
        }
    }
}

/// Pulse sweeping back and forth along the strip
#[derive(Debug, Clone, Default)]
pub struct PingPong {
    cursors: [LengthScoped<PingPongCursor>; 2],
}

impl PingPong {
    pub fn cursor(&self, strip: StripId) -> Option<&PingPongCursor> {
        self.cursors[strip.index()].get()
    }
}

impl Pattern for PingPong {
    const TICK_INTERVAL: Duration = Duration::from_millis(100);

    fn render(&mut self, ctx: &RenderContext, frame: &mut Frame) {
        for strip in StripId::ALL {
            let leds = frame.strip_mut(strip);
            let count = leds.len();
            let cursor = self.cursors[strip.index()].get_or_init(count, |_| PingPongCursor::default());
            let position = cursor.position();
            draw_pulse(ctx.color, leds, |i| i.abs_diff(position));
            cursor.advance(count);
        }
    }

    fn reset(&mut self) {
        self.cursors.iter_mut().for_each(LengthScoped::clear);
    }
}

/// Offset of two mirrored pulses from the strip center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualPulseCursor {
    offset: usize,
    outward: bool,
}

impl Default for DualPulseCursor {
    fn default() -> Self {
        Self {
            offset: 0,
            outward: true,
        }
    }
}

impl DualPulseCursor {
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Move one LED, reversing at `count / 2` and at the center
    pub fn advance(&mut self, count: usize) {
        let max = count / 2;
        if max == 0 {
            self.offset = 0;
            return;
        }
        self.offset = if self.outward {
            (self.offset + 1).min(max)
        } else {
            self.offset.saturating_sub(1)
        };
        if self.offset >= max {
            self.outward = false;
        } else if self.offset == 0 {
            self.outward = true;
        }
    }
}

/// Two pulses leaving the center, bouncing off the ends and meeting again
#[derive(Debug, Clone, Default)]
pub struct DualPulse {
    cursors: [LengthScoped<DualPulseCursor>; 2],
}

impl DualPulse {
    pub fn cursor(&self, strip: StripId) -> Option<&DualPulseCursor> {
        self.cursors[strip.index()].get()
    }
}

impl Pattern for DualPulse {
    const TICK_INTERVAL: Duration = Duration::from_millis(100);

    fn render(&mut self, ctx: &RenderContext, frame: &mut Frame) {
        for strip in StripId::ALL {
            let leds = frame.strip_mut(strip);
            let count = leds.len();
            let cursor = self.cursors[strip.index()].get_or_init(count, |_| DualPulseCursor::default());
            let center = count / 2;
            let low = center.saturating_sub(cursor.offset());
            let high = center + cursor.offset();
            draw_pulse(ctx.color, leds, |i| i.abs_diff(low).min(i.abs_diff(high)));
            cursor.advance(count);
        }
    }

    fn reset(&mut self) {
        self.cursors.iter_mut().for_each(LengthScoped::clear);
    }
}

/// Pulse running along the strip and wrapping around at the end
#[derive(Debug, Clone, Default)]
pub struct Chase {
    positions: [LengthScoped<usize>; 2],
}

impl Pattern for Chase {
    const TICK_INTERVAL: Duration = Duration::from_millis(100);

    fn render(&mut self, ctx: &RenderContext, frame: &mut Frame) {
        for strip in StripId::ALL {
            let leds = frame.strip_mut(strip);
            let count = leds.len();
            let position = self.positions[strip.index()].get_or_init(count, |_| 0);
            let current = *position;
            draw_pulse(ctx.color, leds, |i| i.abs_diff(current));
            *position = if count == 0 { 0 } else { (current + 1) % count };
        }
    }

    fn reset(&mut self) {
        self.positions.iter_mut().for_each(LengthScoped::clear);
    }
}
