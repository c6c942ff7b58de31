use sf_core::{BorderMode, Error, ImageViewMut};

use crate::conv1d::convolve_f32;
use crate::halfkernel::HalfKernel;

/// Separable Gaussian blur of a float plane, in place.
///
/// Rows are filtered first, then columns, each with the unit-sum kernel
/// from [`HalfKernel::to_symmetric_normalized`]. `border` answers reads past
/// the plane edge; when the plane already carries a halo of at least the
/// kernel radius, the border mode does not affect its interior.
#[derive(Debug, Clone)]
pub struct GaussianSmoother {
    sigma: f32,
    kernel: Vec<f32>,
    line: Vec<f32>,
    filtered: Vec<f32>,
}

impl GaussianSmoother {
    pub fn new(sigma: f32) -> Result<Self, Error> {
        let half = HalfKernel::new(sigma as f64)?;
        Ok(Self {
            sigma,
            kernel: half.to_symmetric_normalized(),
            line: Vec::new(),
            filtered: Vec::new(),
        })
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    pub fn radius(&self) -> usize {
        self.kernel.len() / 2
    }

    pub fn kernel(&self) -> &[f32] {
        &self.kernel
    }

    pub fn apply(&mut self, plane: &mut ImageViewMut<'_, f32>, border: &BorderMode<f32>) {
        let (w, h) = (plane.width(), plane.height());
        if w == 0 || h == 0 || self.kernel.len() == 1 {
            return;
        }

        self.filtered.resize(w, 0.0);
        for y in 0..h {
            let row = plane.row_mut(y);
            convolve_f32(row, &self.kernel, border, &mut self.filtered);
            row.copy_from_slice(&self.filtered);
        }

        self.line.resize(h, 0.0);
        self.filtered.resize(h, 0.0);
        for x in 0..w {
            for (y, v) in self.line.iter_mut().enumerate() {
                *v = plane.row(y)[x];
            }
            convolve_f32(&self.line, &self.kernel, border, &mut self.filtered);
            for (y, &v) in self.filtered.iter().enumerate() {
                plane.row_mut(y)[x] = v;
            }
        }
    }
}
