use core::fmt;

/// One of the two driven strips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StripId {
    Left,
    Right,
}

impl StripId {
    pub const ALL: [Self; 2] = [Self::Left, Self::Right];

    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

impl fmt::Display for StripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

/// Configured LED count of each strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripLengths {
    pub left: usize,
    pub right: usize,
}

impl StripLengths {
    pub const fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    pub const fn get(self, strip: StripId) -> usize {
        match strip {
            StripId::Left => self.left,
            StripId::Right => self.right,
        }
    }
}

impl Default for StripLengths {
    fn default() -> Self {
        Self::new(60, 60)
    }
}

/// Indices of the middle LED (odd length) or the middle pair (even length)
///
/// Returns `None` for an empty strip.
pub const fn center_pair(count: usize) -> Option<(usize, usize)> {
    if count == 0 {
        return None;
    }
    Some(((count - 1) / 2, count / 2))
}
