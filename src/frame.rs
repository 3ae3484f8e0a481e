use crate::{
    bounds::{StripId, StripLengths},
    color::{BLACK, Rgb},
};

/// One complete set of pixel colors for both strips
///
/// Each strip vector is sized to that strip's configured length. Writes
/// through [`Frame::set`] past the end are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    strips: [Vec<Rgb>; 2],
}

impl Frame {
    /// Create an all-black frame
    pub fn blank(lengths: StripLengths) -> Self {
        Self {
            strips: [vec![BLACK; lengths.left], vec![BLACK; lengths.right]],
        }
    }

    pub fn lengths(&self) -> StripLengths {
        StripLengths::new(self.strips[0].len(), self.strips[1].len())
    }

    pub fn strip(&self, strip: StripId) -> &[Rgb] {
        &self.strips[strip.index()]
    }

    pub fn strip_mut(&mut self, strip: StripId) -> &mut [Rgb] {
        &mut self.strips[strip.index()]
    }

    /// Set a single pixel, ignoring out-of-range indices
    pub fn set(&mut self, strip: StripId, index: usize, color: Rgb) {
        if let Some(pixel) = self.strips[strip.index()].get_mut(index) {
            *pixel = color;
        }
    }

    /// Fill both strips with one color
    pub fn fill(&mut self, color: Rgb) {
        for strip in &mut self.strips {
            strip.fill(color);
        }
    }

    pub fn is_dark(&self) -> bool {
        self.strips.iter().flatten().all(|pixel| *pixel == BLACK)
    }

    /// Number of non-black pixels on a strip
    pub fn lit_count(&self, strip: StripId) -> usize {
        self.strip(strip).iter().filter(|pixel| **pixel != BLACK).count()
    }
}
