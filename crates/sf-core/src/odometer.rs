use crate::Interval;

/// Ripple-carry counter over the axes `first_axis..n` of an interval.
///
/// Axes below `first_axis` stay at their minimum. `first_axis` is the
/// fastest-varying counted axis; on overflow it resets to its minimum and
/// carries into the next axis. The sequence ends when the last axis
/// overflows. With no counted axes there is exactly one position.
///
/// `advance` moves to the next position and returns `false` once exhausted;
/// the first call lands on the start position.
#[derive(Debug, Clone)]
pub struct Odometer {
    min: Vec<i64>,
    max: Vec<i64>,
    first_axis: usize,
    position: Vec<i64>,
    started: bool,
    exhausted: bool,
}

impl Odometer {
    pub fn new(interval: &Interval, first_axis: usize) -> Self {
        Self {
            min: interval.mins().to_vec(),
            max: interval.maxs().to_vec(),
            first_axis: first_axis.min(interval.num_dims()),
            position: interval.mins().to_vec(),
            started: false,
            exhausted: false,
        }
    }

    pub fn position(&self) -> &[i64] {
        &self.position
    }

    /// Counted coordinates only, i.e. `position()[first_axis..]`.
    pub fn counted(&self) -> &[i64] {
        &self.position[self.first_axis..]
    }

    /// Number of positions in a full pass.
    pub fn total(&self) -> usize {
        (self.first_axis..self.min.len())
            .map(|d| (self.max[d] - self.min[d] + 1) as usize)
            .product()
    }

    pub fn reset(&mut self) {
        self.position.copy_from_slice(&self.min);
        self.started = false;
        self.exhausted = false;
    }

    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        if !self.started {
            self.started = true;
            return true;
        }

        for d in self.first_axis..self.position.len() {
            self.position[d] += 1;
            if self.position[d] <= self.max[d] {
                return true;
            }
            self.position[d] = self.min[d];
        }

        self.exhausted = true;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::Odometer;
    use crate::Interval;

    #[test]
    fn counts_in_ripple_carry_order() {
        let iv = Interval::new(vec![0, 0, 1], vec![0, 1, 3]).expect("valid interval");
        let mut odo = Odometer::new(&iv, 1);

        let mut seen = Vec::new();
        while odo.advance() {
            seen.push(odo.counted().to_vec());
        }

        assert_eq!(
            seen,
            vec![
                vec![0, 1],
                vec![1, 1],
                vec![0, 2],
                vec![1, 2],
                vec![0, 3],
                vec![1, 3]
            ]
        );
        assert_eq!(odo.total(), 6);
        assert!(!odo.advance());
    }

    #[test]
    fn no_counted_axes_yields_single_position() {
        let iv = Interval::from_dims(&[4, 3]).expect("valid interval");
        let mut odo = Odometer::new(&iv, 2);

        assert!(odo.advance());
        assert_eq!(odo.position(), &[0, 0]);
        assert!(odo.counted().is_empty());
        assert!(!odo.advance());

        odo.reset();
        assert!(odo.advance());
        assert_eq!(odo.total(), 1);
    }
}
