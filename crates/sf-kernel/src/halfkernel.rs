use sf_core::Error;

/// One side of a truncated, unnormalized Gaussian.
///
/// Conventions:
/// - `sigma == 0` gives the single tap `[1.0]`.
/// - otherwise `len = max(2, round(3 * sigma) + 1)`, so the cutoff sits at
///   about three standard deviations, where the weight has dropped below
///   `exp(-4.5)` of the peak.
/// - `w[d] = exp(-d^2 / (2 * sigma^2))`, hence `w[0] == 1`.
/// - distances `>= len` weigh zero; there is no extrapolation.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfKernel {
    sigma: f64,
    weights: Vec<f64>,
}

impl HalfKernel {
    /// Longest table accepted; larger sigmas are rejected as `InvalidSigma`.
    pub const MAX_LEN: usize = 1 << 20;

    pub fn new(sigma: f64) -> Result<Self, Error> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(Error::InvalidSigma);
        }

        let len = Self::len_for(sigma).ok_or(Error::InvalidSigma)?;
        let two_sq_sigma = 2.0 * sigma * sigma;
        let mut weights = vec![0.0f64; len];
        weights[0] = 1.0;
        for (d, w) in weights.iter_mut().enumerate().skip(1) {
            let x = d as f64;
            *w = (-(x * x) / two_sq_sigma).exp();
        }

        Ok(Self { sigma, weights })
    }

    /// One table per plane axis, `[x, y]`.
    pub fn separable(sigma: [f64; 2]) -> Result<[Self; 2], Error> {
        Ok([Self::new(sigma[0])?, Self::new(sigma[1])?])
    }

    /// Table length, `None` past [`Self::MAX_LEN`].
    fn len_for(sigma: f64) -> Option<usize> {
        if sigma == 0.0 {
            return Some(1);
        }
        let cutoff = (3.0 * sigma + 0.5).floor();
        if cutoff >= Self::MAX_LEN as f64 {
            return None;
        }
        Some((cutoff as usize + 1).max(2))
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Largest distance with a (possibly tiny) non-cut-off weight.
    pub fn radius(&self) -> usize {
        self.weights.len() - 1
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    pub fn weight(&self, distance: usize) -> f64 {
        self.weights.get(distance).copied().unwrap_or(0.0)
    }

    /// Full `2 * radius + 1` tap kernel normalized to unit sum.
    pub fn to_symmetric_normalized(&self) -> Vec<f32> {
        let r = self.radius();
        let mut taps = vec![0.0f64; 2 * r + 1];
        for (d, &w) in self.weights.iter().enumerate() {
            taps[r + d] = w;
            taps[r - d] = w;
        }

        let sum: f64 = taps.iter().sum();
        taps.iter().map(|&t| (t / sum) as f32).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::HalfKernel;
    use sf_core::Error;

    #[test]
    fn weights_are_non_increasing_with_peak_at_zero() {
        for sigma in [0.0, 0.3, 0.5, 1.0, 1.7, 4.0, 12.5] {
            let k = HalfKernel::new(sigma).expect("valid sigma");
            let w = k.weights();
            assert!(!w.is_empty());
            assert_eq!(w[0], 1.0);
            for pair in w.windows(2) {
                assert!(pair[1] <= pair[0], "sigma {sigma}: {pair:?}");
            }
            assert!(w.iter().all(|&v| v <= w[0] && v >= 0.0));
        }
    }

    #[test]
    fn truncation_follows_three_sigma() {
        assert_eq!(HalfKernel::new(0.0).expect("valid").len(), 1);
        assert_eq!(HalfKernel::new(0.1).expect("valid").len(), 2);
        assert_eq!(HalfKernel::new(1.0).expect("valid").len(), 4);
        assert_eq!(HalfKernel::new(2.5).expect("valid").len(), 9);

        let k = HalfKernel::new(1.0).expect("valid");
        assert!((k.weight(1) - (-0.5f64).exp()).abs() < 1e-15);
        assert!((k.weight(3) - (-4.5f64).exp()).abs() < 1e-15);
        assert_eq!(k.weight(4), 0.0);
        assert_eq!(k.weight(1000), 0.0);
        assert_eq!(k.radius(), 3);
    }

    #[test]
    fn zero_sigma_is_single_tap() {
        let k = HalfKernel::new(0.0).expect("valid");
        assert_eq!(k.weights(), &[1.0]);
        assert_eq!(k.weight(1), 0.0);
        assert_eq!(k.to_symmetric_normalized(), vec![1.0f32]);
    }

    #[test]
    fn rejects_negative_and_non_finite_sigma() {
        assert_eq!(HalfKernel::new(-0.5), Err(Error::InvalidSigma));
        assert_eq!(HalfKernel::new(f64::NAN), Err(Error::InvalidSigma));
        assert_eq!(HalfKernel::new(f64::INFINITY), Err(Error::InvalidSigma));
        assert_eq!(HalfKernel::separable([1.0, -1.0]), Err(Error::InvalidSigma));
    }

    #[test]
    fn rejects_sigma_beyond_table_limit() {
        assert_eq!(HalfKernel::new(1e20), Err(Error::InvalidSigma));
        assert_eq!(HalfKernel::new(1e16), Err(Error::InvalidSigma));
        assert_eq!(HalfKernel::new(f64::MAX), Err(Error::InvalidSigma));

        let largest = (HalfKernel::MAX_LEN - 1) as f64 / 3.0 - 1.0;
        let k = HalfKernel::new(largest).expect("within limit");
        assert!(k.len() <= HalfKernel::MAX_LEN);
        assert_eq!(
            HalfKernel::new(HalfKernel::MAX_LEN as f64 / 3.0),
            Err(Error::InvalidSigma)
        );
    }

    #[test]
    fn symmetric_kernel_has_unit_sum() {
        let k = HalfKernel::new(1.3).expect("valid");
        let taps = k.to_symmetric_normalized();
        assert_eq!(taps.len(), 2 * k.radius() + 1);

        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        for i in 0..k.radius() {
            assert_eq!(taps[i], taps[taps.len() - 1 - i]);
        }
    }
}
