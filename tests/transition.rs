mod tests {
    use embassy_time::Duration;
    use stereo_light_composer::{
        StripId, StripLengths, TransitionTimings,
        channel::{Channel, TrySendError},
        color::{Rgb, hue_to_rgb},
        transition::TransitionFlash,
    };

    #[test]
    fn test_flash_sequence() {
        let lengths = StripLengths::new(4, 3);
        let steps: Vec<_> = TransitionFlash::new(TransitionTimings::default(), lengths).collect();

        assert_eq!(steps.len(), 6);
        for (k, step) in steps.iter().take(5).enumerate() {
            let expected = hue_to_rgb(k as f32 / 5.0, 255);
            assert_eq!(step.hold, Duration::from_millis(50));
            assert_eq!(step.frame.lengths(), lengths);
            for strip in StripId::ALL {
                assert!(step.frame.strip(strip).iter().all(|pixel| *pixel == expected));
            }
        }

        let last = &steps[5];
        assert!(last.frame.is_dark());
        assert_eq!(last.frame.lengths(), lengths);
        assert_eq!(last.hold, Duration::from_millis(500));
    }

    #[test]
    fn test_flash_duration() {
        let flash = TransitionFlash::new(TransitionTimings::default(), StripLengths::default());
        assert_eq!(flash.duration(), Duration::from_millis(750));

        let timings = TransitionTimings {
            flash_frames: 2,
            flash_frame: Duration::from_millis(10),
            blackout: Duration::from_millis(20),
        };
        let flash = TransitionFlash::new(timings, StripLengths::default());
        assert_eq!(flash.duration(), Duration::from_millis(40));
        assert_eq!(flash.count(), 3);
    }

    #[test]
    fn test_flash_first_frame_is_red() {
        let mut flash = TransitionFlash::new(TransitionTimings::default(), StripLengths::new(2, 2));
        let first = flash.next().expect("flash has frames");
        assert_eq!(first.frame.strip(StripId::Left)[0], Rgb { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn test_channel_fifo_and_capacity() {
        let channel: Channel<u8, 4> = Channel::new();
        assert!(channel.is_empty());
        for value in 0..4 {
            assert_eq!(channel.try_send(value), Ok(()));
        }
        assert_eq!(channel.try_send(9), Err(TrySendError(9)));
        assert_eq!(channel.len(), 4);

        assert_eq!(channel.try_receive(), Some(0));
        assert_eq!(channel.try_receive(), Some(1));

        channel.clear();
        assert!(channel.is_empty());
        assert_eq!(channel.try_receive(), None);
    }
}
