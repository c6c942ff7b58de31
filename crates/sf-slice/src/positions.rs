use sf_core::{Interval, Odometer};

/// Slice positions of an interval: every combination of the coordinates of
/// axes `2..n`, axis 2 varying fastest.
///
/// Each item holds the `n - 2` higher coordinates; a rank-2 interval yields a
/// single empty position (the whole plane).
#[derive(Debug, Clone)]
pub struct SlicePositions {
    odometer: Odometer,
}

impl SlicePositions {
    pub fn new(interval: &Interval) -> Self {
        Self {
            odometer: Odometer::new(interval, 2),
        }
    }

    /// Number of positions in a full pass.
    pub fn total(&self) -> usize {
        self.odometer.total()
    }

    pub fn reset(&mut self) {
        self.odometer.reset();
    }

    /// Advances without allocating; read the position with [`Self::current`].
    pub fn advance(&mut self) -> bool {
        self.odometer.advance()
    }

    pub fn current(&self) -> &[i64] {
        self.odometer.counted()
    }
}

impl Iterator for SlicePositions {
    type Item = Vec<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().then(|| self.current().to_vec())
    }
}
