/// Generator state bound to one strip length
///
/// The state is created lazily on first use and recreated whenever the
/// requested length differs from the one it was built for.
#[derive(Debug, Clone)]
pub struct LengthScoped<T> {
    length: usize,
    state: Option<T>,
}

impl<T> Default for LengthScoped<T> {
    fn default() -> Self {
        Self {
            length: 0,
            state: None,
        }
    }
}

impl<T> LengthScoped<T> {
    /// State for `length`, initialising it when missing or stale
    pub fn get_or_init(&mut self, length: usize, init: impl FnOnce(usize) -> T) -> &mut T {
        if self.length != length {
            self.state = None;
            self.length = length;
        }
        self.state.get_or_insert_with(|| init(length))
    }

    pub fn get(&self) -> Option<&T> {
        self.state.as_ref()
    }

    /// Length the current state was built for
    pub fn length(&self) -> Option<usize> {
        self.state.as_ref().map(|_| self.length)
    }

    pub fn clear(&mut self) {
        self.state = None;
    }
}
