//! Audio amplitude analysis
//!
//! The [`AmplitudeTracker`] turns blocks of interleaved 16-bit audio into a
//! smoothed, normalized loudness per channel. Without a live source, or when
//! a read fails, it falls back to a [`Simulator`] for that tick.

#[cfg(feature = "capture")]
mod capture;
mod simulator;
mod tracker;

use embassy_time::Instant;

#[cfg(feature = "capture")]
pub use capture::CaptureSource;
pub use simulator::Simulator;
pub use tracker::{AmplitudeTracker, block_levels, smooth};

use crate::{bounds::StripId, config::AmplitudeConfig, error::AudioError};

/// Upper bound of a normalized amplitude
pub const MAX_AMPLITUDE: f32 = 100.0;

/// Normalized loudness of both channels, each in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AmplitudeSample {
    pub left: f32,
    pub right: f32,
}

impl AmplitudeSample {
    pub const SILENT: Self = Self {
        left: 0.0,
        right: 0.0,
    };

    /// Create a sample, clamping both channels and mapping non-finite values to 0
    pub fn new(left: f32, right: f32) -> Self {
        Self {
            left: clamp_amplitude(left),
            right: clamp_amplitude(right),
        }
    }

    /// Duplicate one value into both channels
    pub fn mono(value: f32) -> Self {
        Self::new(value, value)
    }

    /// Mean of both channels, used by the mono generators
    pub fn mean(self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn channel(self, strip: StripId) -> f32 {
        match strip {
            StripId::Left => self.left,
            StripId::Right => self.right,
        }
    }
}

fn clamp_amplitude(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, MAX_AMPLITUDE)
    } else {
        0.0
    }
}

/// Source of raw interleaved 16-bit audio blocks
pub trait AudioSource {
    /// Number of interleaved channels in a block
    fn channels(&self) -> u16;

    /// Replace `out` with `frames` frames of interleaved samples
    fn read_block(&mut self, frames: usize, out: &mut Vec<i16>) -> Result<(), AudioError>;
}

/// Anything that yields one amplitude sample per tick
///
/// Implemented by [`AmplitudeTracker`]; tests and embedders may inject
/// their own.
pub trait AmplitudeInput {
    fn sample(&mut self, now: Instant) -> AmplitudeSample;
}

/// Open the default input device, or degrade to simulated input
///
/// Called once per audio-mode run, on the render thread.
pub fn open_default(config: AmplitudeConfig) -> AmplitudeTracker {
    #[cfg(feature = "capture")]
    {
        match CaptureSource::open_default(&config) {
            Ok(source) => {
                log::info!("Audio input opened with {} channel(s)", source.channels());
                return AmplitudeTracker::new(Some(Box::new(source)), config);
            }
            Err(err) => {
                log::warn!("Audio input unavailable, using simulated amplitude: {err}");
            }
        }
    }
    #[cfg(not(feature = "capture"))]
    log::info!("Live capture disabled, using simulated amplitude");

    AmplitudeTracker::new(None, config)
}
