//! Flash played when the configuration changes
//!
//! A few full-strip frames stepping around the hue wheel, followed by a
//! dark pause.

use embassy_time::Duration;

use crate::{
    bounds::StripLengths,
    color::hue_to_rgb,
    config::TransitionTimings,
    frame::Frame,
};

/// One frame of the flash and how long it stays on the strips
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashStep {
    pub frame: Frame,
    pub hold: Duration,
}

/// Iterator over the steps of a transition flash
///
/// Yields `flash_frames` colored frames (frame `k` shows hue
/// `k / flash_frames`) and then one blank frame held for `blackout`.
#[derive(Debug, Clone)]
pub struct TransitionFlash {
    timings: TransitionTimings,
    lengths: StripLengths,
    step: u8,
    finished: bool,
}

impl TransitionFlash {
    pub const fn new(timings: TransitionTimings, lengths: StripLengths) -> Self {
        Self {
            timings,
            lengths,
            step: 0,
            finished: false,
        }
    }

    /// Total time the flash keeps the strips busy
    pub fn duration(&self) -> Duration {
        self.timings.flash_frame * u32::from(self.timings.flash_frames) + self.timings.blackout
    }
}

impl Iterator for TransitionFlash {
    type Item = FlashStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut frame = Frame::blank(self.lengths);
        if self.step < self.timings.flash_frames {
            let hue = f32::from(self.step) / f32::from(self.timings.flash_frames);
            frame.fill(hue_to_rgb(hue, 255));
            self.step += 1;
            return Some(FlashStep {
                frame,
                hold: self.timings.flash_frame,
            });
        }

        self.finished = true;
        Some(FlashStep {
            frame,
            hold: self.timings.blackout,
        })
    }
}
