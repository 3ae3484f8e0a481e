mod tests {
    use std::{collections::VecDeque, sync::Arc};

    use embassy_time::{Duration, Instant};
    use stereo_light_composer::{
        AmplitudeInput, AmplitudeSample, ColorSpec, IntentChannel, LightConfig, LoopIntent, Mode,
        PatternId, Renderer, StaticPattern, StripId, StripLengths, TickError, TickOutput,
        color::{Rgb, WHITE},
    };

    /// Amplitude input replaying fixed samples, then silence
    struct Scripted(VecDeque<AmplitudeSample>);

    impl AmplitudeInput for Scripted {
        fn sample(&mut self, _now: Instant) -> AmplitudeSample {
            self.0.pop_front().unwrap_or(AmplitudeSample::SILENT)
        }
    }

    fn config(mode: Mode) -> LightConfig {
        LightConfig {
            mode,
            color: ColorSpec::Fixed(WHITE),
            lengths: StripLengths::new(10, 10),
            ..LightConfig::default()
        }
    }

    fn renderer(mode: Mode) -> (Renderer, Arc<IntentChannel>) {
        let intents = Arc::new(IntentChannel::new());
        (Renderer::new(mode, Arc::clone(&intents)), intents)
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_level_meter_follows_amplitude() {
        let script = [0.0, 25.0, 50.0, 75.0, 100.0].map(AmplitudeSample::mono);
        let (renderer, _) = renderer(Mode::Audio);
        let mut renderer = renderer.with_amplitude(Box::new(Scripted(script.into())));
        let mut config = config(Mode::Audio);
        config.audio_pattern = "level_meter".into();

        let mut lit = Vec::new();
        for ms in 0..5 {
            let tick = renderer.tick(&config, at(ms * 20)).expect("tick");
            assert_eq!(tick.interval, Duration::from_millis(20));
            let TickOutput::Frame(frame) = tick.output else {
                panic!("expected a frame, got {:?}", tick.output);
            };
            lit.push(frame.lit_count(StripId::Left));
        }
        assert_eq!(lit, [0, 2, 5, 7, 10]);
    }

    #[test]
    fn test_audio_without_input_is_silent() {
        let (mut renderer, _) = renderer(Mode::Audio);
        let mut config = config(Mode::Audio);
        config.audio_pattern = "level_meter".into();
        let tick = renderer.tick(&config, at(0)).expect("tick");
        let TickOutput::Frame(frame) = tick.output else {
            panic!("expected a frame");
        };
        assert!(frame.is_dark());
    }

    #[test]
    fn test_unmapped_pattern_fails_tick() {
        let (mut renderer, _) = renderer(Mode::Audio);
        let mut config = config(Mode::Audio);
        config.audio_pattern = "fire".into();

        let err = renderer.tick(&config, at(0)).unwrap_err();
        assert!(matches!(
            err,
            TickError::UnmappedPattern { mode: Mode::Audio, ref pattern } if pattern == "fire"
        ));
        assert_eq!(renderer.active_pattern(), None);
    }

    #[test]
    fn test_empty_pattern_uses_default() {
        let (mut renderer, _) = renderer(Mode::Static);
        let tick = renderer.tick(&config(Mode::Static), at(0)).expect("tick");
        assert_eq!(
            renderer.active_pattern(),
            Some(PatternId::Static(StaticPattern::Solid))
        );
        let TickOutput::Frame(frame) = tick.output else {
            panic!("expected a frame");
        };
        assert_eq!(frame.lit_count(StripId::Right), 10);
        assert_eq!(tick.interval, Duration::from_millis(100));
    }

    #[test]
    fn test_off_blanks_once() {
        let (mut renderer, _) = renderer(Mode::Off);
        let mut config = config(Mode::Off);
        config.brightness = 40;

        let first = renderer.tick(&config, at(0)).expect("tick");
        assert_eq!(first.output, TickOutput::Blank(config.lengths));
        assert_eq!(first.interval, Duration::from_millis(100));
        assert_eq!(first.brightness, 40);

        for ms in 1..5 {
            let tick = renderer.tick(&config, at(ms * 100)).expect("tick");
            assert_eq!(tick.output, TickOutput::Idle);
        }

        config.lengths = StripLengths::new(12, 8);
        let tick = renderer.tick(&config, at(600)).expect("tick");
        assert_eq!(tick.output, TickOutput::Blank(StripLengths::new(12, 8)));
    }

    #[test]
    fn test_config_off_stops_generator() {
        let (mut renderer, _) = renderer(Mode::Static);
        let mut config = config(Mode::Static);
        assert!(matches!(
            renderer.tick(&config, at(0)).expect("tick").output,
            TickOutput::Frame(_)
        ));

        config.mode = Mode::Off;
        let tick = renderer.tick(&config, at(100)).expect("tick");
        assert_eq!(tick.output, TickOutput::Blank(config.lengths));
    }

    #[test]
    fn test_flash_intent_plays_before_generator() {
        let (mut renderer, intents) = renderer(Mode::Static);
        let config = config(Mode::Static);
        intents.try_send(LoopIntent::Flash).expect("room in channel");

        let mut holds = Vec::new();
        for ms in 0..6 {
            let tick = renderer.tick(&config, at(ms)).expect("tick");
            assert!(renderer.is_flashing());
            holds.push(tick.interval.as_millis());
            if ms == 0 {
                let TickOutput::Frame(frame) = &tick.output else {
                    panic!("expected a frame");
                };
                assert_eq!(frame.strip(StripId::Left)[0], Rgb { r: 255, g: 0, b: 0 });
            }
            if ms == 5 {
                let TickOutput::Frame(frame) = &tick.output else {
                    panic!("expected a frame");
                };
                assert!(frame.is_dark());
            }
        }
        assert_eq!(holds, [50, 50, 50, 50, 50, 500]);

        let tick = renderer.tick(&config, at(600)).expect("tick");
        assert!(!renderer.is_flashing());
        let TickOutput::Frame(frame) = tick.output else {
            panic!("expected a frame");
        };
        assert_eq!(frame.strip(StripId::Left)[0], WHITE);
    }

    #[test]
    fn test_reset_intent_restarts_pattern() {
        let (mut renderer, intents) = renderer(Mode::Static);
        let mut config = config(Mode::Static);
        config.static_pattern = "rainbow_cycle".into();

        let first = renderer.tick(&config, at(0)).expect("tick").output;
        for ms in 1..4 {
            renderer.tick(&config, at(ms * 20)).expect("tick");
        }
        intents.try_send(LoopIntent::ResetPattern).expect("room in channel");
        let after_reset = renderer.tick(&config, at(100)).expect("tick").output;
        assert_eq!(after_reset, first);
    }

    #[test]
    fn test_pattern_switch_replaces_state() {
        let (mut renderer, _) = renderer(Mode::Static);
        let mut config = config(Mode::Static);
        config.static_pattern = "chase".into();
        let first = renderer.tick(&config, at(0)).expect("tick").output;
        renderer.tick(&config, at(100)).expect("tick");

        config.static_pattern = "ping_pong".into();
        renderer.tick(&config, at(200)).expect("tick");
        assert_eq!(
            renderer.active_pattern(),
            Some(PatternId::Static(StaticPattern::PingPong))
        );

        // A fresh chase starts again from LED 0
        config.static_pattern = "chase".into();
        assert_eq!(renderer.tick(&config, at(300)).expect("tick").output, first);
    }

    #[test]
    fn test_static_run_ignores_audio_pattern() {
        let (mut renderer, _) = renderer(Mode::Static);
        let mut config = config(Mode::Static);
        config.audio_pattern = "not_a_pattern".into();
        config.static_pattern = "fire".into();
        assert!(renderer.tick(&config, at(0)).is_ok());
        assert_eq!(renderer.mode(), Mode::Static);
    }
}
