mod tests {
    use std::collections::VecDeque;

    use embassy_time::Instant;
    use stereo_light_composer::{
        AmplitudeConfig, AmplitudeInput, AmplitudeSample, AmplitudeTracker, AudioError,
        AudioSource, StripId,
        amplitude::{Simulator, block_levels, smooth},
    };

    /// Source replaying a script of constant-valued blocks and failures
    struct ScriptedSource {
        channels: u16,
        script: VecDeque<Result<i16, AudioError>>,
    }

    impl AudioSource for ScriptedSource {
        fn channels(&self) -> u16 {
            self.channels
        }

        fn read_block(&mut self, frames: usize, out: &mut Vec<i16>) -> Result<(), AudioError> {
            let value = self.script.pop_front().unwrap_or(Err(AudioError::Closed))?;
            out.clear();
            out.resize(frames * usize::from(self.channels), value);
            Ok(())
        }
    }

    fn unsmoothed() -> AmplitudeConfig {
        AmplitudeConfig {
            smoothing: 1.0,
            gain: 1.0,
            block_frames: 64,
            ..AmplitudeConfig::default()
        }
    }

    fn in_range(sample: AmplitudeSample) -> bool {
        (0.0..=100.0).contains(&sample.left) && (0.0..=100.0).contains(&sample.right)
    }

    #[test]
    fn test_sample_clamping() {
        let sample = AmplitudeSample::new(150.0, -5.0);
        assert_eq!(sample.left, 100.0);
        assert_eq!(sample.right, 0.0);
        assert_eq!(AmplitudeSample::new(f32::NAN, f32::INFINITY), AmplitudeSample::SILENT);

        let sample = AmplitudeSample::new(20.0, 60.0);
        assert_eq!(sample.mean(), 40.0);
        assert_eq!(sample.channel(StripId::Left), 20.0);
        assert_eq!(sample.channel(StripId::Right), 60.0);
    }

    #[test]
    fn test_block_levels_silence() {
        assert_eq!(block_levels(&[0; 128], 2, 5.0), AmplitudeSample::SILENT);
        assert_eq!(block_levels(&[], 2, 5.0), AmplitudeSample::SILENT);
    }

    #[test]
    fn test_block_levels_full_scale_mono() {
        let block: Vec<i16> = (0..256)
            .map(|i| if i % 2 == 0 { i16::MAX } else { i16::MIN })
            .collect();
        let sample = block_levels(&block, 1, 1.0);
        assert!(sample.left > 99.9, "{}", sample.left);
        assert_eq!(sample.left, sample.right);
    }

    #[test]
    fn test_block_levels_stereo_separation() {
        let block: Vec<i16> = (0..256).map(|i| if i % 2 == 0 { 3277 } else { 0 }).collect();
        let sample = block_levels(&block, 2, 1.0);
        assert!((sample.left - 10.0).abs() < 0.01, "{}", sample.left);
        assert_eq!(sample.right, 0.0);
    }

    #[test]
    fn test_block_levels_gain_caps() {
        let sample = block_levels(&[8192; 64], 2, 5.0);
        assert_eq!(sample, AmplitudeSample::new(100.0, 100.0));
    }

    #[test]
    fn test_smoothing_converges_without_overshoot() {
        let target = AmplitudeSample::mono(100.0);
        let mut current = AmplitudeSample::SILENT;
        for _ in 0..50 {
            let next = smooth(current, target, 0.3);
            assert!(next.left >= current.left);
            assert!(next.left <= 100.0);
            current = next;
        }
        assert!(current.left > 99.9);

        let mut falling = target;
        for _ in 0..50 {
            let next = smooth(falling, AmplitudeSample::SILENT, 0.3);
            assert!(next.left <= falling.left && next.left >= 0.0);
            falling = next;
        }
        assert!(falling.left < 0.1);
    }

    #[test]
    fn test_smoothing_extremes() {
        let previous = AmplitudeSample::new(10.0, 20.0);
        let current = AmplitudeSample::new(90.0, 40.0);
        assert_eq!(smooth(previous, current, 1.0), current);
        assert_eq!(smooth(previous, current, 0.0), previous);
    }

    #[test]
    fn test_simulator_bounds() {
        let mut simulator = Simulator::with_seed(11);
        let mut right_louder = 0;
        for ms in (0..10_000).step_by(37) {
            let sample = simulator.sample(Instant::from_millis(ms));
            let t = ms as f32 / 1000.0;
            let wave = 30.0 + 40.0 * (t * 2.0).sin().abs();
            let left_jitter = sample.left - wave;
            let right_jitter = sample.right - wave;

            assert!((30.0..=100.0).contains(&sample.left), "{}", sample.left);
            assert!((30.0..=94.0).contains(&sample.right), "{}", sample.right);
            assert!((-1e-3..30.001).contains(&left_jitter), "{left_jitter}");
            assert!((-1e-3..24.001).contains(&right_jitter), "{right_jitter}");
            if sample.right > sample.left {
                right_louder += 1;
            }
        }
        // Independent jitter lets the quieter channel overtake the other
        assert!(right_louder > 0);
    }

    #[test]
    fn test_tracker_reads_live_source() {
        let source = ScriptedSource {
            channels: 2,
            script: VecDeque::from([Ok(16384), Ok(0)]),
        };
        let mut tracker = AmplitudeTracker::new(Some(Box::new(source)), unsmoothed());
        assert!(tracker.has_source());

        let sample = tracker.sample(Instant::from_millis(0));
        assert!(tracker.is_live());
        assert!((sample.left - 50.0).abs() < 0.01);
        assert_eq!(sample.left, sample.right);

        let sample = tracker.sample(Instant::from_millis(20));
        assert_eq!(sample, AmplitudeSample::SILENT);
        assert_eq!(tracker.previous(), AmplitudeSample::SILENT);
    }

    #[test]
    fn test_tracker_falls_back_on_read_error() {
        let source = ScriptedSource {
            channels: 1,
            script: VecDeque::from([Err(AudioError::Timeout), Ok(0)]),
        };
        let mut tracker = AmplitudeTracker::new(Some(Box::new(source)), unsmoothed())
            .with_simulator(Simulator::with_seed(3));

        let sample = tracker.sample(Instant::from_millis(500));
        assert!(!tracker.is_live());
        assert!(sample.left >= 30.0 && in_range(sample));

        let sample = tracker.sample(Instant::from_millis(520));
        assert!(tracker.is_live());
        assert_eq!(sample, AmplitudeSample::SILENT);

        // Script exhausted: the source reports closed and simulation takes over
        let sample = tracker.sample(Instant::from_millis(540));
        assert!(!tracker.is_live());
        assert!(in_range(sample));
    }

    #[test]
    fn test_tracker_without_source_simulates() {
        let mut tracker = AmplitudeTracker::simulated(AmplitudeConfig::default())
            .with_simulator(Simulator::with_seed(9));
        assert!(!tracker.has_source());
        assert_eq!(tracker.previous(), AmplitudeSample::SILENT);
        for ms in (0..2000).step_by(20) {
            let sample = tracker.sample(Instant::from_millis(ms));
            assert!(in_range(sample));
            assert!(!tracker.is_live());
        }
        // Smoothing pulls the level up towards the simulated 30..100 band
        assert!(tracker.previous().left > 20.0);
    }
}
