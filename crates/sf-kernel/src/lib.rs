//! Gaussian weighting primitives.
//!
//! [`HalfKernel`] is the one-sided, truncated, unnormalized Gaussian used as
//! brush weight: separable, so a 2D weight is the product of one table per
//! axis evaluated at absolute distances.
//!
//! [`GaussianSmoother`] turns the same table into a unit-sum symmetric kernel
//! and blurs float planes in place. It fits the operator slot of the slice
//! engine.

pub mod conv1d;
pub mod halfkernel;
pub mod smooth;

pub use halfkernel::HalfKernel;
pub use smooth::GaussianSmoother;
