//! Foundational primitives for editing surface and alignment fields.
//!
//! ## Fields and Intervals
//! An [`NdField`] is a dense N-dimensional array over a closed integer
//! [`Interval`] whose minimum may be non-zero. Axis 0 varies fastest, so each
//! axis-0 lane is contiguous. Axes 0 and 1 span the plane that brushes and
//! 2D operators work on; axis 2 of a displacement field is its channel axis.
//!
//! ## Elements
//! Engines compute in floating point. Stored values cross that boundary only
//! through [`Element::to_f64`] (widen) and [`Element::from_f64`] (narrow,
//! saturating for integer types).
//!
//! ## Extension
//! Reads past a field's interval are a capability, [`ExtendedRead`], rather
//! than a property of every array. [`NdField::extended`] provides it through
//! a [`BorderMode`]; [`FnSource`] provides it for procedural sources.
//!
//! ## Planes
//! [`Image`] and its views are the 2D float buffers handed to operators.

mod access;
mod border;
mod element;
mod error;
mod field;
mod geom;
mod image;
mod interval;
mod odometer;

pub use access::{Extended, ExtendedRead, FnSource};
pub use border::{BorderMode, map_index};
pub use element::Element;
pub use error::Error;
pub use field::NdField;
pub use geom::{Channel, Point2i, Vec2d};
pub use image::{Image, ImageView, ImageViewMut};
pub use interval::Interval;
pub use odometer::Odometer;
