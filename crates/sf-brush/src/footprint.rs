use sf_core::{Element, Error, Interval, NdField, Point2i};
use sf_kernel::HalfKernel;

/// Plane rectangle a stroke at `location` can reach: every `(x, y)` with
/// `|x - location.x| <= kx.radius()` and `|y - location.y| <= ky.radius()`,
/// saturated at the `i64` range.
pub fn footprint(kernels: &[HalfKernel; 2], location: Point2i) -> ((i64, i64), (i64, i64)) {
    let rx = kernels[0].radius() as i64;
    let ry = kernels[1].radius() as i64;
    (
        (location.x.saturating_sub(rx), location.x.saturating_add(rx)),
        (location.y.saturating_sub(ry), location.y.saturating_add(ry)),
    )
}

/// Part of `field` (restricted further by `base` on axes >= 2) covered by
/// the footprint, or `None` when the stroke misses the field entirely.
pub(crate) fn covered_region(
    base: &Interval,
    kernels: &[HalfKernel; 2],
    location: Point2i,
) -> Result<Option<Interval>, Error> {
    let (x, y) = footprint(kernels, location);
    let reach = base.with_planar(x, y)?;
    Ok(base.intersect(&reach))
}

/// Adds `w(x, y) * amount` to every element of `region`.
pub(crate) fn accumulate<T: Element>(
    field: &mut NdField<T>,
    region: &Interval,
    kernels: &[HalfKernel; 2],
    location: Point2i,
    amount: f64,
) -> Result<(), Error> {
    let [kx, ky] = kernels;
    field.for_each_in_mut(region, |pos, v| {
        let w = kx.weight(pos[0].abs_diff(location.x) as usize)
            * ky.weight(pos[1].abs_diff(location.y) as usize);
        *v = T::from_f64(v.to_f64() + w * amount);
    })
}
