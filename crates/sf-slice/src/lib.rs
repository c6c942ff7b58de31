//! Dimension-generic slice processing.
//!
//! An N-dimensional output interval is cut into 2D planes along axes 0 and 1;
//! the remaining axes are enumerated in odometer order ([`SlicePositions`]).
//! Each plane is read from an extended input with a halo of `padding`
//! elements on all four sides ([`PaddedView`]), materialized into an `f32`
//! buffer, handed to an operator, and written back without the halo through
//! a [`ClampRange`] and the output element conversion.
//!
//! ## NaN policy
//! NaN produced by an operator is written as the clamp minimum.
//!
//! ## Failure
//! Operator errors abort the call. Slices already written stay written; the
//! failing slice is not written.

mod clamp;
mod engine;
mod error;
mod padded;
mod positions;

pub use clamp::ClampRange;
pub use engine::{SliceConfig, SliceProcessor, process_slices, try_process_slices};
pub use error::ProcessError;
pub use padded::PaddedView;
pub use positions::SlicePositions;
