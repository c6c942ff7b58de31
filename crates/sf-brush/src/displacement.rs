use sf_core::{Channel, Element, Error, Interval, NdField, Point2i, Vec2d};
use sf_kernel::HalfKernel;
use tracing::trace;

use crate::footprint::{accumulate, covered_region, footprint};

/// Gaussian brush for two-channel displacement fields.
///
/// The field has plane axes 0 and 1 and the channel axis 2
/// (`0` horizontal, `1` vertical). A stroke adds
/// `wx(|x - lx|) * wy(|y - ly|) * delta[channel]` to each element; elements
/// outside the kernel footprint are not written. Axes above 2 are brushed
/// identically at every coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementBrush {
    kernels: [HalfKernel; 2],
}

impl DisplacementBrush {
    pub fn new(sigma: [f64; 2]) -> Result<Self, Error> {
        Ok(Self {
            kernels: HalfKernel::separable(sigma)?,
        })
    }

    pub fn kernel_x(&self) -> &HalfKernel {
        &self.kernels[0]
    }

    pub fn kernel_y(&self) -> &HalfKernel {
        &self.kernels[1]
    }

    /// Inclusive `(x, y)` ranges the stroke may write.
    pub fn footprint(&self, location: Point2i) -> ((i64, i64), (i64, i64)) {
        footprint(&self.kernels, location)
    }

    pub fn apply<T: Element>(
        &self,
        field: &mut NdField<T>,
        location: Point2i,
        delta: Vec2d,
    ) -> Result<(), Error> {
        if field.num_dims() < 3 {
            return Err(Error::RankTooLow {
                required: 3,
                actual: field.num_dims(),
            });
        }

        let interval = field.interval().clone();
        Channel::from_index(interval.min(2))?;
        Channel::from_index(interval.max(2))?;

        for c in interval.min(2)..=interval.max(2) {
            let channel = Channel::from_index(c)?;
            let mut min = interval.mins().to_vec();
            let mut max = interval.maxs().to_vec();
            min[2] = c;
            max[2] = c;
            let plane = Interval::new(min, max)?;

            let Some(region) = covered_region(&plane, &self.kernels, location)? else {
                trace!(x = location.x, y = location.y, "stroke misses field");
                return Ok(());
            };

            trace!(
                x = location.x,
                y = location.y,
                ?channel,
                elements = region.num_elements(),
                "displacement stroke"
            );
            accumulate(
                field,
                &region,
                &self.kernels,
                location,
                delta.component(channel),
            )?;
        }

        Ok(())
    }
}

/// One-shot stroke: builds the kernel tables from `sigma` and applies them.
pub fn apply_localized_update<T: Element>(
    field: &mut NdField<T>,
    location: Point2i,
    delta: Vec2d,
    sigma: [f64; 2],
) -> Result<(), Error> {
    DisplacementBrush::new(sigma)?.apply(field, location, delta)
}
