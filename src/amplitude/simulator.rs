use embassy_time::Instant;

use super::AmplitudeSample;

const BASE_LEVEL: f32 = 30.0;
const SWING: f32 = 40.0;
const JITTER: f32 = 30.0;
const FREQUENCY: f32 = 2.0;
/// Scales the right channel's jitter
const RIGHT_RATIO: f32 = 0.8;

/// Stand-in loudness when no audio is available
///
/// Left is `30 + 40·|sin(2t)| + U(0, 30)`. Right shares the wave but draws
/// its own jitter scaled by 0.8, so the channels move independently. Both
/// are capped at 100. Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct Simulator {
    rng: fastrand::Rng,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn sample(&mut self, now: Instant) -> AmplitudeSample {
        let t = (now.as_millis() as f64 / 1000.0) as f32;
        let wave = BASE_LEVEL + SWING * (t * FREQUENCY).sin().abs();
        let left = wave + self.rng.f32() * JITTER;
        let right = wave + self.rng.f32() * JITTER * RIGHT_RATIO;
        AmplitudeSample::new(left, right)
    }
}
