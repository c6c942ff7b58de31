//! Localized Gaussian-weighted field updates.
//!
//! A stroke at integer location `(lx, ly)` adds
//! `wx(|x - lx|) * wy(|y - ly|) * amount` to the elements of the plane axes
//! 0 and 1, where `wx`, `wy` are [`sf_kernel::HalfKernel`] tables. Weights
//! cut off hard at the table length, so only the kernel footprint is written
//! and everything else stays bit-identical. Strokes accumulate.
//!
//! - [`DisplacementBrush`] edits two-channel displacement fields (channel
//!   axis 2: `0` horizontal, `1` vertical).
//! - [`HeightBrush`] edits scalar height fields.

mod displacement;
mod footprint;
mod height;

pub use displacement::{DisplacementBrush, apply_localized_update};
pub use footprint::footprint;
pub use height::{HeightBrush, apply_height_update};
