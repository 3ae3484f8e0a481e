use embassy_time::Instant;

use super::{AmplitudeInput, AmplitudeSample, AudioSource, MAX_AMPLITUDE, Simulator};
use crate::{config::AmplitudeConfig, error::AudioError};

/// Full scale of a signed 16-bit sample
const FULL_SCALE: f32 = 32_768.0;

/// Smoothed per-channel loudness from a live or simulated source
///
/// The audio source is owned here and released when the tracker is dropped,
/// which happens when the audio-mode run that created it ends.
pub struct AmplitudeTracker {
    source: Option<Box<dyn AudioSource>>,
    simulator: Simulator,
    config: AmplitudeConfig,
    previous: AmplitudeSample,
    block: Vec<i16>,
    live: bool,
}

impl AmplitudeTracker {
    pub fn new(source: Option<Box<dyn AudioSource>>, config: AmplitudeConfig) -> Self {
        let live = source.is_some();
        Self {
            source,
            simulator: Simulator::new(),
            config,
            previous: AmplitudeSample::SILENT,
            block: Vec::with_capacity(config.block_frames * usize::from(config.max_channels)),
            live,
        }
    }

    /// Tracker that always simulates
    pub fn simulated(config: AmplitudeConfig) -> Self {
        Self::new(None, config)
    }

    #[must_use]
    pub fn with_simulator(mut self, simulator: Simulator) -> Self {
        self.simulator = simulator;
        self
    }

    /// Whether the last sample came from the live source
    pub const fn is_live(&self) -> bool {
        self.live
    }

    pub const fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Last smoothed sample
    pub const fn previous(&self) -> AmplitudeSample {
        self.previous
    }

    fn read_live(&mut self) -> Option<Result<AmplitudeSample, AudioError>> {
        let source = self.source.as_mut()?;
        let channels = source.channels();
        Some(
            source
                .read_block(self.config.block_frames, &mut self.block)
                .map(|()| block_levels(&self.block, channels, self.config.gain)),
        )
    }
}

impl AmplitudeInput for AmplitudeTracker {
    fn sample(&mut self, now: Instant) -> AmplitudeSample {
        let current = match self.read_live() {
            Some(Ok(sample)) => {
                self.live = true;
                sample
            }
            Some(Err(err)) => {
                log::warn!("Audio read failed, simulating this tick: {err}");
                self.live = false;
                self.simulator.sample(now)
            }
            None => {
                self.live = false;
                self.simulator.sample(now)
            }
        };

        self.previous = smooth(self.previous, current, self.config.smoothing);
        self.previous
    }
}

/// Normalized RMS loudness of an interleaved block
///
/// Channels are separated by stride. A mono block is duplicated into both
/// channels; channels past the second are ignored. Each channel maps to
/// `min(100, rms / 32768 * 100 * gain)`.
pub fn block_levels(samples: &[i16], channels: u16, gain: f32) -> AmplitudeSample {
    let stride = usize::from(channels.max(1));
    let level = |offset: usize| {
        let mut sum = 0.0f64;
        let mut count = 0usize;
        for sample in samples.iter().skip(offset).step_by(stride) {
            let value = f64::from(*sample);
            sum += value * value;
            count += 1;
        }
        if count == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_possible_truncation)]
        let rms = (sum / count as f64).sqrt() as f32;
        (rms / FULL_SCALE * MAX_AMPLITUDE * gain).min(MAX_AMPLITUDE)
    };

    let left = level(0);
    let right = if stride > 1 { level(1) } else { left };
    AmplitudeSample::new(left, right)
}

/// Exponential smoothing: `alpha * current + (1 - alpha) * previous`, per channel
///
/// The result always lies between `previous` and `current`.
pub fn smooth(previous: AmplitudeSample, current: AmplitudeSample, alpha: f32) -> AmplitudeSample {
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |prev: f32, cur: f32| {
        (alpha * cur + (1.0 - alpha) * prev).clamp(prev.min(cur), prev.max(cur))
    };
    AmplitudeSample::new(
        mix(previous.left, current.left),
        mix(previous.right, current.right),
    )
}
