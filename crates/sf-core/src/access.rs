use core::marker::PhantomData;

use crate::border::{BorderMode, map_index};
use crate::{Element, NdField};

/// Read access defined at every integer coordinate.
///
/// This is the capability the slice engine needs for its halo: reads past
/// the nominal output bounds are answered by the source's own extension
/// policy. `pos.len()` must equal `num_dims()`.
pub trait ExtendedRead {
    type Element: Element;

    fn num_dims(&self) -> usize;

    fn read(&self, pos: &[i64]) -> Self::Element;
}

impl<S: ExtendedRead + ?Sized> ExtendedRead for &S {
    type Element = S::Element;

    fn num_dims(&self) -> usize {
        (**self).num_dims()
    }

    fn read(&self, pos: &[i64]) -> Self::Element {
        (**self).read(pos)
    }
}

/// A field extended beyond its interval by a [`BorderMode`], applied per
/// axis.
#[derive(Debug, Clone)]
pub struct Extended<'a, T> {
    field: &'a NdField<T>,
    border: BorderMode<T>,
}

impl<'a, T: Copy> Extended<'a, T> {
    pub fn new(field: &'a NdField<T>, border: BorderMode<T>) -> Self {
        Self { field, border }
    }

    pub fn border(&self) -> &BorderMode<T> {
        &self.border
    }
}

impl<T: Element> ExtendedRead for Extended<'_, T> {
    type Element = T;

    fn num_dims(&self) -> usize {
        self.field.num_dims()
    }

    fn read(&self, pos: &[i64]) -> T {
        debug_assert_eq!(pos.len(), self.num_dims(), "position rank mismatch");

        let interval = self.field.interval();
        let mut index = 0usize;
        let mut stride = 1usize;
        for (d, &p) in pos.iter().enumerate() {
            let len = interval.dimension(d);
            let rel = p.saturating_sub(interval.min(d)) as isize;
            let mapped = if rel >= 0 && (rel as usize) < len {
                rel as usize
            } else {
                match map_index(rel, len, &self.border) {
                    Some(i) => i,
                    None => match self.border {
                        BorderMode::Constant(v) => return v,
                        _ => unreachable!("non-constant borders map every index"),
                    },
                }
            };
            index += mapped * stride;
            stride *= len;
        }

        self.field.data()[index]
    }
}

/// Lazy source computing each element from its coordinate.
pub struct FnSource<T, F> {
    num_dims: usize,
    f: F,
    _element: PhantomData<fn() -> T>,
}

impl<T, F> FnSource<T, F>
where
    T: Element,
    F: Fn(&[i64]) -> T,
{
    pub fn new(num_dims: usize, f: F) -> Self {
        Self {
            num_dims,
            f,
            _element: PhantomData,
        }
    }
}

impl<T, F> ExtendedRead for FnSource<T, F>
where
    T: Element,
    F: Fn(&[i64]) -> T,
{
    type Element = T;

    fn num_dims(&self) -> usize {
        self.num_dims
    }

    fn read(&self, pos: &[i64]) -> T {
        debug_assert_eq!(pos.len(), self.num_dims, "position rank mismatch");
        (self.f)(pos)
    }
}
