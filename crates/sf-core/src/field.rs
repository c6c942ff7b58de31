use crate::access::Extended;
use crate::border::BorderMode;
use crate::{Error, Interval, Odometer};

/// Owned N-dimensional field over an [`Interval`].
///
/// Storage is dense with axis 0 varying fastest, so every axis-0 lane is a
/// contiguous slice. Coordinates are absolute: the element at
/// `interval.mins()` is `data[0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NdField<T> {
    interval: Interval,
    strides: Vec<usize>,
    data: Vec<T>,
}

impl<T> NdField<T> {
    pub fn from_vec(interval: Interval, data: Vec<T>) -> Result<Self, Error> {
        let expected = checked_len(&interval).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            strides: strides_for(&interval),
            interval,
            data,
        })
    }

    /// Zero-based field with the given extents.
    pub fn from_dims(dims: &[usize], data: Vec<T>) -> Result<Self, Error> {
        Self::from_vec(Interval::from_dims(dims)?, data)
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    pub fn num_dims(&self) -> usize {
        self.interval.num_dims()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn index_of(&self, pos: &[i64]) -> Option<usize> {
        if !self.interval.contains(pos) {
            return None;
        }

        Some(
            pos.iter()
                .zip(self.interval.mins())
                .zip(&self.strides)
                .map(|((&p, &lo), &s)| (p - lo) as usize * s)
                .sum(),
        )
    }

    pub fn get(&self, pos: &[i64]) -> Option<&T> {
        let idx = self.index_of(pos)?;
        self.data.get(idx)
    }

    pub fn get_mut(&mut self, pos: &[i64]) -> Option<&mut T> {
        let idx = self.index_of(pos)?;
        self.data.get_mut(idx)
    }

    pub fn set(&mut self, pos: &[i64], value: T) -> Result<(), Error> {
        self.check_rank(pos)?;
        *self.get_mut(pos).ok_or(Error::OutOfBounds)? = value;
        Ok(())
    }

    /// Contiguous run of `len` elements along axis 0 starting at `start`.
    pub fn lane(&self, start: &[i64], len: usize) -> Result<&[T], Error> {
        let range = self.lane_range(start, len)?;
        Ok(&self.data[range])
    }

    pub fn lane_mut(&mut self, start: &[i64], len: usize) -> Result<&mut [T], Error> {
        let range = self.lane_range(start, len)?;
        Ok(&mut self.data[range])
    }

    /// Visits every element of `region` (which must lie inside the field)
    /// with its absolute position.
    pub fn for_each_in_mut<F>(&mut self, region: &Interval, mut f: F) -> Result<(), Error>
    where
        F: FnMut(&[i64], &mut T),
    {
        if region.num_dims() != self.num_dims() {
            return Err(Error::DimensionMismatch {
                expected: self.num_dims(),
                actual: region.num_dims(),
            });
        }
        if !self.interval.contains(region.mins()) || !self.interval.contains(region.maxs()) {
            return Err(Error::OutOfBounds);
        }

        let width = region.dimension(0);
        let mut odo = Odometer::new(region, 1);
        let mut pos = region.mins().to_vec();
        while odo.advance() {
            pos.copy_from_slice(odo.position());
            let start = self.index_of(&pos).ok_or(Error::OutOfBounds)?;
            for (i, v) in self.data[start..start + width].iter_mut().enumerate() {
                pos[0] = region.min(0) + i as i64;
                f(&pos, v);
            }
        }

        Ok(())
    }

    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&[i64], &mut T),
    {
        let mut odo = Odometer::new(&self.interval, 0);
        for v in self.data.iter_mut() {
            odo.advance();
            f(odo.position(), v);
        }
    }

    fn check_rank(&self, pos: &[i64]) -> Result<(), Error> {
        if pos.len() != self.num_dims() {
            return Err(Error::DimensionMismatch {
                expected: self.num_dims(),
                actual: pos.len(),
            });
        }
        Ok(())
    }

    fn lane_range(&self, start: &[i64], len: usize) -> Result<core::ops::Range<usize>, Error> {
        self.check_rank(start)?;
        let first = self.index_of(start).ok_or(Error::OutOfBounds)?;
        if len == 0 {
            return Ok(first..first);
        }

        let last_x = start[0]
            .checked_add(len as i64 - 1)
            .ok_or(Error::OutOfBounds)?;
        if last_x > self.interval.max(0) {
            return Err(Error::OutOfBounds);
        }

        Ok(first..first + len)
    }
}

impl<T: Clone> NdField<T> {
    pub fn new_fill(interval: Interval, value: T) -> Self {
        let len = checked_len(&interval).expect("field size overflow");
        Self {
            strides: strides_for(&interval),
            interval,
            data: vec![value; len],
        }
    }
}

impl<T: Copy> NdField<T> {
    /// View that answers reads at any coordinate using `border` outside the
    /// field's interval.
    pub fn extended(&self, border: BorderMode<T>) -> Extended<'_, T> {
        Extended::new(self, border)
    }
}

fn checked_len(interval: &Interval) -> Option<usize> {
    (0..interval.num_dims()).try_fold(1usize, |acc, d| acc.checked_mul(interval.dimension(d)))
}

fn strides_for(interval: &Interval) -> Vec<usize> {
    let mut strides = Vec::with_capacity(interval.num_dims());
    let mut s = 1usize;
    for d in 0..interval.num_dims() {
        strides.push(s);
        s *= interval.dimension(d);
    }
    strides
}
