mod tests {
    use stereo_light_composer::math8::{dim8, scale8, unit8};

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_dim8() {
        assert_eq!(dim8(255, 0), 0);
        assert_eq!(dim8(255, 127), 127);
        assert_eq!(dim8(255, 255), 255);
        assert_eq!(dim8(128, 128), 64);
        assert_eq!(dim8(100, 255), 100);
    }

    #[test]
    fn test_unit8() {
        assert_eq!(unit8(0.0), 0);
        assert_eq!(unit8(0.5), 127);
        assert_eq!(unit8(1.0), 255);
        assert_eq!(unit8(1.5), 255);
        assert_eq!(unit8(-0.2), 0);
        assert_eq!(unit8(f32::NAN), 0);
        assert_eq!(unit8(f32::INFINITY), 0);
    }
}
