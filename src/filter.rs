//! Software brightness for sinks without a hardware brightness control

use crate::{
    StripSink,
    bounds::{StripId, StripLengths},
    color::Rgb,
    error::SinkError,
    frame::Frame,
    math8::scale8,
};

/// Scale every channel of a pixel (255 = passthrough, 0 = black)
#[inline]
pub fn apply_brightness(pixel: Rgb, brightness: u8) -> Rgb {
    Rgb {
        r: scale8(pixel.r, brightness),
        g: scale8(pixel.g, brightness),
        b: scale8(pixel.b, brightness),
    }
}

/// Sink adapter that applies brightness to frames before forwarding them
#[derive(Debug)]
pub struct Dimmed<S> {
    inner: S,
    brightness: u8,
}

impl<S: StripSink> Dimmed<S> {
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            brightness: u8::MAX,
        }
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: StripSink> StripSink for Dimmed<S> {
    fn pixel_count(&self, strip: StripId) -> usize {
        self.inner.pixel_count(strip)
    }

    fn show(&mut self, mut frame: Frame) -> Result<(), SinkError> {
        if self.brightness < u8::MAX {
            for strip in StripId::ALL {
                for pixel in frame.strip_mut(strip) {
                    *pixel = apply_brightness(*pixel, self.brightness);
                }
            }
        }
        self.inner.show(frame)
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn blank(&mut self, lengths: StripLengths) -> Result<(), SinkError> {
        self.inner.blank(lengths)
    }
}
