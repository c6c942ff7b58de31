use crate::Error;

/// Closed integer box `[min, max]` per axis.
///
/// Intervals are never empty: every axis satisfies `min[d] <= max[d]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    min: Vec<i64>,
    max: Vec<i64>,
}

impl Interval {
    pub fn new(min: Vec<i64>, max: Vec<i64>) -> Result<Self, Error> {
        if min.len() != max.len() {
            return Err(Error::DimensionMismatch {
                expected: min.len(),
                actual: max.len(),
            });
        }
        if let Some(axis) = min.iter().zip(&max).position(|(lo, hi)| hi < lo) {
            return Err(Error::EmptyInterval { axis });
        }
        // Extents must stay representable as `max - min + 1`.
        if let Some(axis) = min
            .iter()
            .zip(&max)
            .position(|(&lo, &hi)| hi.checked_sub(lo).is_none_or(|w| w == i64::MAX))
        {
            return Err(Error::IntervalTooLarge { axis });
        }

        Ok(Self { min, max })
    }

    /// Zero-based interval with the given extents.
    pub fn from_dims(dims: &[usize]) -> Result<Self, Error> {
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(Error::EmptyInterval { axis });
        }

        let min = vec![0; dims.len()];
        let max = dims
            .iter()
            .enumerate()
            .map(|(axis, &d)| i64::try_from(d - 1).map_err(|_| Error::IntervalTooLarge { axis }))
            .collect::<Result<_, _>>()?;
        Self::new(min, max)
    }

    pub fn num_dims(&self) -> usize {
        self.min.len()
    }

    pub fn min(&self, axis: usize) -> i64 {
        self.min[axis]
    }

    pub fn max(&self, axis: usize) -> i64 {
        self.max[axis]
    }

    pub fn mins(&self) -> &[i64] {
        &self.min
    }

    pub fn maxs(&self) -> &[i64] {
        &self.max
    }

    /// Number of integer positions along `axis`.
    pub fn dimension(&self, axis: usize) -> usize {
        (self.max[axis] - self.min[axis] + 1) as usize
    }

    pub fn num_elements(&self) -> usize {
        (0..self.num_dims()).map(|d| self.dimension(d)).product()
    }

    pub fn contains(&self, pos: &[i64]) -> bool {
        pos.len() == self.num_dims()
            && pos
                .iter()
                .zip(self.min.iter().zip(&self.max))
                .all(|(&p, (&lo, &hi))| lo <= p && p <= hi)
    }

    /// Grows axes 0 and 1 by `padding` on both sides. Higher axes are kept.
    pub fn expand_planar(&self, padding: usize) -> Result<Interval, Error> {
        let mut min = self.min.clone();
        let mut max = self.max.clone();
        for axis in 0..self.num_dims().min(2) {
            let grown = i64::try_from(padding).ok().and_then(|p| {
                Some((min[axis].checked_sub(p)?, max[axis].checked_add(p)?))
            });
            (min[axis], max[axis]) = grown.ok_or(Error::IntervalTooLarge { axis })?;
        }
        Interval::new(min, max)
    }

    /// Copy with axes 0 and 1 replaced by the given ranges.
    pub fn with_planar(&self, x: (i64, i64), y: (i64, i64)) -> Result<Interval, Error> {
        if self.num_dims() < 2 {
            return Err(Error::RankTooLow {
                required: 2,
                actual: self.num_dims(),
            });
        }

        let mut min = self.min.clone();
        let mut max = self.max.clone();
        (min[0], max[0]) = x;
        (min[1], max[1]) = y;
        Interval::new(min, max)
    }

    /// Overlap of two intervals of equal rank, `None` when they are disjoint.
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        if self.num_dims() != other.num_dims() {
            return None;
        }

        let mut min = Vec::with_capacity(self.num_dims());
        let mut max = Vec::with_capacity(self.num_dims());
        for d in 0..self.num_dims() {
            let lo = self.min[d].max(other.min[d]);
            let hi = self.max[d].min(other.max[d]);
            if hi < lo {
                return None;
            }
            min.push(lo);
            max.push(hi);
        }

        Some(Interval { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::Interval;
    use crate::Error;

    #[test]
    fn rejects_empty_and_mismatched_bounds() {
        assert_eq!(
            Interval::new(vec![0, 0], vec![3]),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            Interval::new(vec![0, 5, 0], vec![3, 4, 0]),
            Err(Error::EmptyInterval { axis: 1 })
        );
        assert_eq!(
            Interval::from_dims(&[4, 0]),
            Err(Error::EmptyInterval { axis: 1 })
        );
    }

    #[test]
    fn expand_planar_only_touches_first_two_axes() {
        let iv = Interval::new(vec![0, 10, 2], vec![4, 20, 5]).expect("valid interval");
        let padded = iv.expand_planar(3).expect("no overflow");

        assert_eq!(padded.mins(), &[-3, 7, 2]);
        assert_eq!(padded.maxs(), &[7, 23, 5]);
        assert_eq!(padded.dimension(0), 11);
        assert_eq!(iv.num_elements(), 5 * 11 * 4);
    }

    #[test]
    fn rejects_extents_past_coordinate_range() {
        assert_eq!(
            Interval::new(vec![0, i64::MIN], vec![0, i64::MAX]),
            Err(Error::IntervalTooLarge { axis: 1 })
        );
        assert_eq!(
            Interval::new(vec![-1], vec![i64::MAX]),
            Err(Error::IntervalTooLarge { axis: 0 })
        );
        assert_eq!(
            Interval::from_dims(&[3, usize::MAX]),
            Err(Error::IntervalTooLarge { axis: 1 })
        );

        let widest = Interval::new(vec![0], vec![i64::MAX - 1]).expect("representable");
        assert_eq!(widest.dimension(0), i64::MAX as usize);

        let edge = Interval::new(vec![i64::MIN, 0], vec![i64::MIN + 4, 4]).expect("valid");
        assert_eq!(edge.expand_planar(1), Err(Error::IntervalTooLarge { axis: 0 }));
        assert_eq!(
            Interval::from_dims(&[4, 4])
                .expect("valid")
                .expand_planar(usize::MAX),
            Err(Error::IntervalTooLarge { axis: 0 })
        );
    }

    #[test]
    fn intersect_and_contains() {
        let a = Interval::from_dims(&[10, 10]).expect("valid interval");
        let b = Interval::new(vec![-4, 6], vec![2, 15]).expect("valid interval");

        let ab = a.intersect(&b).expect("overlapping");
        assert_eq!(ab.mins(), &[0, 6]);
        assert_eq!(ab.maxs(), &[2, 9]);
        assert!(ab.contains(&[1, 7]));
        assert!(!ab.contains(&[3, 7]));
        assert!(!ab.contains(&[1]));

        let far = Interval::new(vec![20, 20], vec![30, 30]).expect("valid interval");
        assert!(a.intersect(&far).is_none());
    }
}
