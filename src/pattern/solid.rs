use embassy_time::Duration;

use super::{Pattern, RenderContext};
use crate::frame::Frame;

/// Whole strip in the configured color, white for rainbow
#[derive(Debug, Clone, Copy, Default)]
pub struct Solid;

impl Pattern for Solid {
    const TICK_INTERVAL: Duration = Duration::from_millis(100);

    fn render(&mut self, ctx: &RenderContext, frame: &mut Frame) {
        frame.fill(ctx.color.base_or_white());
    }
}
