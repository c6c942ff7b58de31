use sf_core::Error;

/// Intensity range processed values are clamped into before write-back.
///
/// NaN is mapped to `min`; infinities clamp like any other value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampRange {
    min: f32,
    max: f32,
}

impl ClampRange {
    pub fn new(min: f32, max: f32) -> Result<Self, Error> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(Error::InvalidClampRange);
        }
        Ok(Self { min, max })
    }

    /// The whole finite `f32` range.
    pub fn unbounded() -> Self {
        Self {
            min: -f32::MAX,
            max: f32::MAX,
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    #[inline]
    pub fn apply(&self, v: f32) -> f32 {
        if v.is_nan() {
            return self.min;
        }
        v.clamp(self.min, self.max)
    }
}

impl Default for ClampRange {
    fn default() -> Self {
        Self::unbounded()
    }
}
