//! Umbrella crate for the `surface-fields` workspace.
//!
//! Re-exports the field primitives, kernel tables, brushes and the
//! slice-wise processing engine.

pub use sf_brush::*;
pub use sf_core::*;
pub use sf_kernel::*;
pub use sf_slice::*;
