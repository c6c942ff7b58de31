use core::convert::Infallible;

use sf_core::{Element, Error, ExtendedRead, Image, ImageViewMut, NdField};
use tracing::{debug, trace};

use crate::clamp::ClampRange;
use crate::error::ProcessError;
use crate::padded::PaddedView;
use crate::positions::SlicePositions;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SliceConfig {
    /// Halo added on both sides of axes 0 and 1.
    pub padding: usize,
    pub clamp: ClampRange,
}

/// Runs a 2D operator over every plane of an N-dimensional field.
///
/// For each slice position of the output interval (odometer order, axis 2
/// fastest) the processor copies the padded float plane of the input into a
/// scratch buffer, hands it to the operator, then clamps and converts the
/// unpadded part into the output. Planes are independent.
///
/// The scratch plane is kept between calls.
#[derive(Debug)]
pub struct SliceProcessor {
    plane: Image<f32>,
}

impl Default for SliceProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl SliceProcessor {
    pub fn new() -> Self {
        Self {
            plane: Image::new_fill(0, 0, 0.0),
        }
    }

    /// Fallible-operator variant.
    ///
    /// An operator error stops the call at once. The failing slice is not
    /// written; slices before it are.
    pub fn try_process<S, T, F, E>(
        &mut self,
        input: &S,
        output: &mut NdField<T>,
        cfg: &SliceConfig,
        mut op: F,
    ) -> Result<(), ProcessError<E>>
    where
        S: ExtendedRead + ?Sized,
        T: Element,
        F: FnMut(&mut ImageViewMut<'_, f32>) -> Result<(), E>,
    {
        let out_interval = output.interval().clone();
        let view = PaddedView::new(input, &out_interval, cfg.padding)?;
        let (out_w, out_h) = (out_interval.dimension(0), out_interval.dimension(1));
        let p = cfg.padding;

        let mut positions = SlicePositions::new(&out_interval);
        debug!(
            rank = out_interval.num_dims(),
            width = out_w,
            height = out_h,
            padding = p,
            slices = positions.total(),
            clamp_min = cfg.clamp.min(),
            clamp_max = cfg.clamp.max(),
            "processing slices"
        );

        let mut lane_start = out_interval.mins().to_vec();
        while positions.advance() {
            let slice = positions.current();
            trace!(?slice, "slice");

            view.copy_plane_into(slice, &mut self.plane)?;
            if let Err(err) = op(&mut self.plane.as_view_mut()) {
                debug!(?slice, "slice operator failed");
                return Err(ProcessError::Operator(err));
            }

            let processed = self.plane.as_view().subview(p, p, out_w, out_h)?;
            lane_start[2..].copy_from_slice(slice);
            for y in 0..out_h {
                lane_start[1] = out_interval.min(1) + y as i64;
                let lane = output.lane_mut(&lane_start, out_w)?;
                for (dst, &v) in lane.iter_mut().zip(processed.row(y)) {
                    *dst = T::from_f64(cfg.clamp.apply(v) as f64);
                }
            }
        }

        Ok(())
    }

    pub fn process<S, T, F>(
        &mut self,
        input: &S,
        output: &mut NdField<T>,
        cfg: &SliceConfig,
        mut op: F,
    ) -> Result<(), Error>
    where
        S: ExtendedRead + ?Sized,
        T: Element,
        F: FnMut(&mut ImageViewMut<'_, f32>),
    {
        self.try_process(input, output, cfg, |plane| {
            op(plane);
            Ok::<(), Infallible>(())
        })
        .map_err(Error::from)
    }
}

/// One-shot [`SliceProcessor::process`].
pub fn process_slices<S, T, F>(
    input: &S,
    output: &mut NdField<T>,
    cfg: &SliceConfig,
    op: F,
) -> Result<(), Error>
where
    S: ExtendedRead + ?Sized,
    T: Element,
    F: FnMut(&mut ImageViewMut<'_, f32>),
{
    SliceProcessor::new().process(input, output, cfg, op)
}

/// One-shot [`SliceProcessor::try_process`].
pub fn try_process_slices<S, T, F, E>(
    input: &S,
    output: &mut NdField<T>,
    cfg: &SliceConfig,
    op: F,
) -> Result<(), ProcessError<E>>
where
    S: ExtendedRead + ?Sized,
    T: Element,
    F: FnMut(&mut ImageViewMut<'_, f32>) -> Result<(), E>,
{
    SliceProcessor::new().try_process(input, output, cfg, op)
}

#[cfg(test)]
mod tests {
    use sf_core::{BorderMode, Error, FnSource, Interval, NdField};
    use sf_kernel::GaussianSmoother;

    use super::{SliceConfig, SliceProcessor, process_slices, try_process_slices};
    use crate::{ClampRange, ProcessError};

    fn ramp_field(dims: &[usize]) -> NdField<u16> {
        let iv = Interval::from_dims(dims).expect("valid dims");
        let mut field = NdField::new_fill(iv, 0u16);
        field.for_each_mut(|pos, v| {
            *v = pos
                .iter()
                .enumerate()
                .map(|(d, &p)| (p as u16) * 7u16.pow(d as u32))
                .sum();
        });
        field
    }

    #[test]
    fn identity_operator_reproduces_input() {
        let input = ramp_field(&[6, 5, 3, 2]);
        let mut output = NdField::new_fill(input.interval().clone(), 9999u16);

        process_slices(
            &input.extended(BorderMode::Clamp),
            &mut output,
            &SliceConfig::default(),
            |_| {},
        )
        .expect("valid call");

        assert_eq!(output.data(), input.data());
    }

    #[test]
    fn identity_with_padding_and_offset_interval() {
        let iv = Interval::new(vec![-2, 3, 1], vec![2, 6, 2]).expect("valid interval");
        let mut input = NdField::new_fill(iv.clone(), 0.0f32);
        input.for_each_mut(|pos, v| *v = (pos[0] * 100 + pos[1] * 10 + pos[2]) as f32);
        let mut output = NdField::new_fill(iv, 0.0f32);

        let cfg = SliceConfig {
            padding: 3,
            ..SliceConfig::default()
        };
        let mut sizes = Vec::new();
        process_slices(
            &input.extended(BorderMode::Reflect101),
            &mut output,
            &cfg,
            |plane| sizes.push((plane.width(), plane.height())),
        )
        .expect("valid call");

        assert_eq!(sizes, vec![(11, 10), (11, 10)]);
        assert_eq!(output, input);
    }

    #[test]
    fn outputs_respect_clamp_range_including_nan() {
        let input = ramp_field(&[4, 4, 2]);
        let mut output = NdField::new_fill(input.interval().clone(), 0.0f32);
        let cfg = SliceConfig {
            padding: 1,
            clamp: ClampRange::new(-1.0, 10.0).expect("valid range"),
        };

        let mut call = 0;
        process_slices(&input.extended(BorderMode::Clamp), &mut output, &cfg, |plane| {
            call += 1;
            for y in 0..plane.height() {
                for (x, v) in plane.row_mut(y).iter_mut().enumerate() {
                    *v = match (x + y + call) % 4 {
                        0 => f32::NAN,
                        1 => f32::INFINITY,
                        2 => -1e30,
                        _ => *v,
                    };
                }
            }
        })
        .expect("valid call");

        assert!(output.data().iter().all(|&v| (-1.0..=10.0).contains(&v)));
        // plane cell (1, 1) of slice 0 is output (0, 0, 0): (1 + 1 + 1) % 4 == 3 keeps 0.
        assert_eq!(output.get(&[0, 0, 0]), Some(&0.0));
        // (2 + 1 + 1) % 4 == 0 -> NaN -> min clamp.
        assert_eq!(output.get(&[1, 0, 0]), Some(&-1.0));
        assert_eq!(output.get(&[2, 0, 0]), Some(&10.0));
    }

    #[test]
    fn integer_output_is_clamped_then_narrowed() {
        let src = FnSource::new(2, |p: &[i64]| (p[0] * 100) as f32 - 50.0);
        let iv = Interval::from_dims(&[4, 1]).expect("valid dims");
        let mut output = NdField::new_fill(iv, 0u8);
        let cfg = SliceConfig {
            padding: 0,
            clamp: ClampRange::new(0.0, 200.0).expect("valid range"),
        };

        process_slices(&src, &mut output, &cfg, |_| {}).expect("valid call");
        assert_eq!(output.data(), &[0, 50, 150, 200]);
    }

    #[test]
    fn operator_sees_halo_from_extension() {
        let iv = Interval::from_dims(&[3, 3]).expect("valid dims");
        let input = NdField::from_vec(iv.clone(), vec![1.0f64; 9]).expect("valid field");
        let mut output = NdField::new_fill(iv, 0.0f64);
        let cfg = SliceConfig {
            padding: 1,
            ..SliceConfig::default()
        };

        // Replace each interior cell by the sum of its 3x3 neighbourhood.
        process_slices(
            &input.extended(BorderMode::Constant(0.0)),
            &mut output,
            &cfg,
            |plane| {
                let width = plane.width();
                let copy: Vec<Vec<f32>> =
                    (0..plane.height()).map(|y| plane.row(y).to_vec()).collect();
                for y in 1..plane.height() - 1 {
                    for x in 1..width - 1 {
                        let mut acc = 0.0;
                        for row in &copy[y - 1..=y + 1] {
                            acc += row[x - 1] + row[x] + row[x + 1];
                        }
                        plane.row_mut(y)[x] = acc;
                    }
                }
            },
        )
        .expect("valid call");

        assert_eq!(
            output.data(),
            &[4.0, 6.0, 4.0, 6.0, 9.0, 6.0, 4.0, 6.0, 4.0]
        );
    }

    #[test]
    fn smoothing_operator_keeps_constant_volume() {
        let iv = Interval::from_dims(&[16, 12, 3]).expect("valid dims");
        let input = NdField::new_fill(iv.clone(), 77u8);
        let mut output = NdField::new_fill(iv, 0u8);
        let mut smoother = GaussianSmoother::new(2.0).expect("valid sigma");
        let cfg = SliceConfig {
            padding: smoother.radius(),
            clamp: ClampRange::new(0.0, 255.0).expect("valid range"),
        };

        process_slices(&input.extended(BorderMode::Reflect101), &mut output, &cfg, |plane| {
            smoother.apply(plane, &BorderMode::Clamp)
        })
        .expect("valid call");

        assert!(output.data().iter().all(|&v| v == 77));
    }

    #[test]
    fn operator_error_aborts_and_leaves_failing_slice_untouched() {
        let input = ramp_field(&[3, 3, 4]);
        let mut output = NdField::new_fill(input.interval().clone(), 1234u16);

        let mut seen = 0;
        let res = try_process_slices(
            &input.extended(BorderMode::Clamp),
            &mut output,
            &SliceConfig::default(),
            |plane| {
                seen += 1;
                if seen == 2 {
                    return Err("filter exploded");
                }
                plane.fill(5.0);
                Ok(())
            },
        );

        assert_eq!(res, Err(ProcessError::Operator("filter exploded")));
        assert_eq!(seen, 2);
        for z in 0..4i64 {
            let expected = if z == 0 { 5 } else { 1234 };
            for y in 0..3i64 {
                for x in 0..3i64 {
                    assert_eq!(output.get(&[x, y, z]), Some(&expected));
                }
            }
        }
    }

    #[test]
    fn rejects_mismatched_rank_and_flat_output() {
        let input = ramp_field(&[3, 3, 2]);
        let mut flat = NdField::new_fill(Interval::from_dims(&[3, 3]).expect("valid"), 0u16);
        assert_eq!(
            process_slices(
                &input.extended(BorderMode::Clamp),
                &mut flat,
                &SliceConfig::default(),
                |_| {}
            ),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );

        let line_src = FnSource::new(1, |_: &[i64]| 0u8);
        let mut line = NdField::new_fill(Interval::from_dims(&[3]).expect("valid"), 0u8);
        assert_eq!(
            SliceProcessor::new().process(&line_src, &mut line, &SliceConfig::default(), |_| {}),
            Err(Error::RankTooLow {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn processor_reuses_scratch_across_calls() {
        let mut proc = SliceProcessor::new();
        let small = ramp_field(&[2, 2]);
        let large = ramp_field(&[5, 4, 2]);

        let cfg = SliceConfig::default();

        let mut out_large = NdField::new_fill(large.interval().clone(), 0u16);
        proc.process(&large.extended(BorderMode::Clamp), &mut out_large, &cfg, |_| {})
            .expect("valid call");
        let mut out_small = NdField::new_fill(small.interval().clone(), 0u16);
        proc.process(&small.extended(BorderMode::Clamp), &mut out_small, &cfg, |_| {})
            .expect("valid call");

        assert_eq!(out_large, large);
        assert_eq!(out_small, small);
    }
}
