mod tests {
    use stereo_light_composer::{
        ColorError, ColorSpec,
        color::{
            BLACK, Rgb, WHITE, complement, dim, hex_to_rgb, hue_to_rgb, named_color, rgb_to_hex,
            scale,
        },
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

    #[test]
    fn test_hue_to_rgb_sectors() {
        assert_eq!(hue_to_rgb(0.0, 255), RED);
        assert_eq!(hue_to_rgb(0.25, 255), Rgb { r: 127, g: 255, b: 0 });
        assert_eq!(hue_to_rgb(0.5, 255), Rgb { r: 0, g: 255, b: 255 });
        assert_eq!(hue_to_rgb(0.75, 255), Rgb { r: 127, g: 0, b: 255 });
    }

    #[test]
    fn test_hue_to_rgb_sector_boundaries() {
        assert_eq!(hue_to_rgb(0.0, 255), RED);
        assert_eq!(hue_to_rgb(1.0 / 6.0, 255), Rgb { r: 255, g: 255, b: 0 });
        assert_eq!(hue_to_rgb(2.0 / 6.0, 255), Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(hue_to_rgb(3.0 / 6.0, 255), Rgb { r: 0, g: 255, b: 255 });
        assert_eq!(hue_to_rgb(4.0 / 6.0, 255), Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(hue_to_rgb(5.0 / 6.0, 255), Rgb { r: 255, g: 0, b: 255 });
    }

    #[test]
    fn test_hue_to_rgb_wraps() {
        assert_eq!(hue_to_rgb(1.0, 255), RED);
        assert_eq!(hue_to_rgb(-0.25, 255), hue_to_rgb(0.75, 255));
        assert_eq!(hue_to_rgb(2.5, 255), hue_to_rgb(0.5, 255));
        assert_eq!(hue_to_rgb(f32::NAN, 255), RED);
    }

    #[test]
    fn test_hue_to_rgb_intensity() {
        assert_eq!(hue_to_rgb(0.0, 128), Rgb { r: 128, g: 0, b: 0 });
        assert_eq!(hue_to_rgb(0.5, 0), BLACK);
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(
            hex_to_rgb("#ff8000"),
            Ok(Rgb {
                r: 255,
                g: 128,
                b: 0
            })
        );
        assert_eq!(hex_to_rgb("00FF00"), Ok(Rgb { r: 0, g: 255, b: 0 }));
    }

    #[test]
    fn test_hex_to_rgb_invalid() {
        for value in ["", "#fff", "zzzzzz", "#1234567", "##123456", "12 456"] {
            assert_eq!(
                hex_to_rgb(value),
                Err(ColorError::InvalidColorFormat(value.to_string())),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rgb_to_hex() {
        let color = Rgb {
            r: 255,
            g: 128,
            b: 0,
        };
        assert_eq!(rgb_to_hex(color), "#ff8000");
        assert_eq!(hex_to_rgb(&rgb_to_hex(color)), Ok(color));
    }

    #[test]
    fn test_scale() {
        let color = Rgb {
            r: 200,
            g: 100,
            b: 50,
        };
        assert_eq!(scale(color, 0.5), Rgb { r: 100, g: 50, b: 25 });
        assert_eq!(scale(color, 2.0), Rgb { r: 255, g: 200, b: 100 });
        assert_eq!(scale(color, 0.0), BLACK);
        assert_eq!(scale(color, f32::NAN), BLACK);
    }

    #[test]
    fn test_dim_and_complement() {
        assert_eq!(dim(WHITE, 255), WHITE);
        assert_eq!(dim(WHITE, 100), Rgb { r: 100, g: 100, b: 100 });
        assert_eq!(complement(RED), Rgb { r: 0, g: 255, b: 255 });
        assert_eq!(complement(BLACK), WHITE);
    }

    #[test]
    fn test_color_spec_parse() {
        assert_eq!(ColorSpec::parse("rainbow"), Ok(ColorSpec::Rainbow));
        assert_eq!(ColorSpec::parse(" Rainbow "), Ok(ColorSpec::Rainbow));
        assert_eq!(
            ColorSpec::parse("#00ff00"),
            Ok(ColorSpec::Fixed(Rgb { r: 0, g: 255, b: 0 }))
        );
        assert!(ColorSpec::parse("nope").is_err());
    }

    #[test]
    fn test_color_spec_parse_names() {
        assert_eq!(ColorSpec::parse("red"), Ok(ColorSpec::Fixed(RED)));
        assert_eq!(
            ColorSpec::parse(" Purple "),
            Ok(ColorSpec::Fixed(Rgb { r: 128, g: 0, b: 128 }))
        );
        assert_eq!(
            ColorSpec::parse("YELLOW"),
            Ok(ColorSpec::Fixed(Rgb { r: 255, g: 255, b: 0 }))
        );
        assert_eq!(named_color("Green"), Some(Rgb { r: 0, g: 255, b: 0 }));
        assert_eq!(named_color("blue"), Some(Rgb { r: 0, g: 0, b: 255 }));
        assert_eq!(named_color("orange"), None);
        // Names never shadow hex
        assert_eq!(
            ColorSpec::parse("0000ff"),
            Ok(ColorSpec::Fixed(Rgb { r: 0, g: 0, b: 255 }))
        );
        assert_eq!(
            ColorSpec::parse("orange"),
            Err(ColorError::InvalidColorFormat("orange".to_string()))
        );
    }

    #[test]
    fn test_color_spec_display() {
        assert_eq!(ColorSpec::Rainbow.to_string(), "rainbow");
        assert_eq!(ColorSpec::Fixed(RED).to_string(), "#ff0000");
        assert_eq!(ColorSpec::Rainbow.base_or_white(), WHITE);
        assert_eq!(ColorSpec::from(RED).base_or_white(), RED);
    }
}
