use sf_core::{Element, Error, ExtendedRead, Image, Interval};

/// Float view of an extended source over an output interval grown by a halo
/// on axes 0 and 1.
///
/// Halo reads go to the source's own extension policy; the view never
/// clamps at the nominal output bounds.
#[derive(Debug, Clone)]
pub struct PaddedView<'a, S: ?Sized> {
    source: &'a S,
    interval: Interval,
    padding: usize,
}

impl<'a, S: ExtendedRead + ?Sized> PaddedView<'a, S> {
    pub fn new(source: &'a S, output: &Interval, padding: usize) -> Result<Self, Error> {
        if output.num_dims() < 2 {
            return Err(Error::RankTooLow {
                required: 2,
                actual: output.num_dims(),
            });
        }
        if source.num_dims() != output.num_dims() {
            return Err(Error::DimensionMismatch {
                expected: output.num_dims(),
                actual: source.num_dims(),
            });
        }

        Ok(Self {
            source,
            interval: output.expand_planar(padding)?,
            padding,
        })
    }

    /// The padded interval.
    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    pub fn plane_width(&self) -> usize {
        self.interval.dimension(0)
    }

    pub fn plane_height(&self) -> usize {
        self.interval.dimension(1)
    }

    pub fn get(&self, pos: &[i64]) -> Result<f32, Error> {
        if pos.len() != self.interval.num_dims() {
            return Err(Error::DimensionMismatch {
                expected: self.interval.num_dims(),
                actual: pos.len(),
            });
        }
        if !self.interval.contains(pos) {
            return Err(Error::OutOfBounds);
        }
        Ok(self.source.read(pos).to_f32())
    }

    /// Copies the padded plane at slice position `slice` (coordinates of
    /// axes `2..n`) into `plane`, reshaping it to the padded plane size.
    pub fn copy_plane_into(&self, slice: &[i64], plane: &mut Image<f32>) -> Result<(), Error> {
        let n = self.interval.num_dims();
        if slice.len() != n - 2 {
            return Err(Error::DimensionMismatch {
                expected: n - 2,
                actual: slice.len(),
            });
        }

        let mut pos = self.interval.mins().to_vec();
        pos[2..].copy_from_slice(slice);
        if !self.interval.contains(&pos) {
            return Err(Error::OutOfBounds);
        }

        let (w, h) = (self.plane_width(), self.plane_height());
        plane.reshape(w, h, 0.0);
        let mut view = plane.as_view_mut();
        for y in 0..h {
            pos[1] = self.interval.min(1) + y as i64;
            for (x, out) in view.row_mut(y).iter_mut().enumerate() {
                pos[0] = self.interval.min(0) + x as i64;
                *out = self.source.read(&pos).to_f32();
            }
        }

        Ok(())
    }
}
