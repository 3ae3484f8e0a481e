mod setting;
mod utils;

use smart_leds::RGB8;

pub use setting::{ColorSpec, named_color};
pub use utils::{
    BLACK, WHITE, complement, dim, hex_to_rgb, hue_to_rgb, rgb_from_u32, rgb_to_hex, scale,
};

pub type Rgb = RGB8;
