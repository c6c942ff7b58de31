use sf_core::{Element, Error, NdField, Point2i};
use sf_kernel::HalfKernel;
use tracing::trace;

use crate::footprint::{accumulate, covered_region, footprint};

/// Gaussian brush for scalar height fields: raises (or lowers) the surface
/// around a location by `w(x, y) * delta`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightBrush {
    kernels: [HalfKernel; 2],
}

impl HeightBrush {
    pub fn new(sigma: [f64; 2]) -> Result<Self, Error> {
        Ok(Self {
            kernels: HalfKernel::separable(sigma)?,
        })
    }

    pub fn footprint(&self, location: Point2i) -> ((i64, i64), (i64, i64)) {
        footprint(&self.kernels, location)
    }

    pub fn apply<T: Element>(
        &self,
        field: &mut NdField<T>,
        location: Point2i,
        delta: f64,
    ) -> Result<(), Error> {
        if field.num_dims() < 2 {
            return Err(Error::RankTooLow {
                required: 2,
                actual: field.num_dims(),
            });
        }

        let interval = field.interval().clone();
        let Some(region) = covered_region(&interval, &self.kernels, location)? else {
            return Ok(());
        };

        trace!(
            x = location.x,
            y = location.y,
            delta,
            elements = region.num_elements(),
            "height stroke"
        );
        accumulate(field, &region, &self.kernels, location, delta)
    }
}

pub fn apply_height_update<T: Element>(
    field: &mut NdField<T>,
    location: Point2i,
    delta: f64,
    sigma: [f64; 2],
) -> Result<(), Error> {
    HeightBrush::new(sigma)?.apply(field, location, delta)
}
