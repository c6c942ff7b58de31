use sf_core::{BorderMode, map_index};

/// Convolves `signal` with a symmetric odd-length `kernel` into `out`.
///
/// Samples outside the signal come from `border`. The kernel center is
/// `kernel[kernel.len() / 2]`.
pub fn convolve_f32(signal: &[f32], kernel: &[f32], border: &BorderMode<f32>, out: &mut [f32]) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert!(kernel.len() % 2 == 1, "kernel length must be odd");

    let n = signal.len();
    if n == 0 {
        return;
    }

    let radius = kernel.len() / 2;
    let interior_start = radius.min(n);
    let interior_end = n.saturating_sub(radius).max(interior_start);

    for (i, out_i) in out.iter_mut().enumerate().take(interior_start) {
        *out_i = convolve_at_border(signal, kernel, i, border);
    }

    // Full kernel footprint is in bounds for `i` in `[radius, n - radius)`.
    for (i, out_i) in out
        .iter_mut()
        .enumerate()
        .take(interior_end)
        .skip(interior_start)
    {
        let window = &signal[i - radius..=i + radius];
        *out_i = window.iter().zip(kernel).map(|(&s, &k)| s * k).sum();
    }

    for (i, out_i) in out.iter_mut().enumerate().skip(interior_end) {
        *out_i = convolve_at_border(signal, kernel, i, border);
    }
}

fn convolve_at_border(signal: &[f32], kernel: &[f32], i: usize, border: &BorderMode<f32>) -> f32 {
    let n = signal.len();
    let radius = kernel.len() / 2;
    let mut acc = 0.0f32;
    for (k, &kv) in kernel.iter().enumerate() {
        let idx = i as isize + k as isize - radius as isize;
        let v = if idx >= 0 && (idx as usize) < n {
            signal[idx as usize]
        } else {
            match map_index(idx, n, border) {
                Some(mapped) => signal[mapped],
                None => match border {
                    BorderMode::Constant(c) => *c,
                    _ => 0.0,
                },
            }
        };
        acc += v * kv;
    }
    acc
}
