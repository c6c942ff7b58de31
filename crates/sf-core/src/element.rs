/// Scalar element types a field can store.
///
/// Engines compute in floating point and cross the element boundary through
/// exactly two conversions:
/// - `to_f64` widens the stored value (exact for every type except 64-bit
///   integers beyond 2^53),
/// - `from_f64` narrows back. Integer types round to nearest, saturate at
///   the type range and map NaN to zero; `f32` uses IEEE narrowing.
pub trait Element: Copy + Send + Sync + 'static {
    fn to_f64(self) -> f64;

    fn from_f64(v: f64) -> Self;

    #[inline]
    fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }
}

macro_rules! impl_float_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $t
                }
            }
        )*
    };
}

macro_rules! impl_int_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(v: f64) -> Self {
                    // `as` saturates out-of-range values and maps NaN to 0.
                    v.round() as $t
                }
            }
        )*
    };
}

impl_float_element!(f32, f64);
impl_int_element!(u8, u16, u32, u64, i8, i16, i32, i64);

#[cfg(test)]
mod tests {
    use super::Element;

    #[test]
    fn integer_narrowing_rounds_and_saturates() {
        assert_eq!(u8::from_f64(12.4), 12);
        assert_eq!(u8::from_f64(12.5), 13);
        assert_eq!(u8::from_f64(300.0), 255);
        assert_eq!(u8::from_f64(-7.0), 0);
        assert_eq!(u8::from_f64(f64::NAN), 0);
        assert_eq!(i16::from_f64(-40000.0), i16::MIN);
        assert_eq!(u16::from_f64(f64::INFINITY), u16::MAX);
    }

    #[test]
    fn float_roundtrip_and_widening() {
        assert_eq!(f32::from_f64(0.25), 0.25);
        assert_eq!(f64::from_f64(1e300), 1e300);
        assert_eq!(200u8.to_f32(), 200.0);
        assert_eq!((-3i32).to_f64(), -3.0);
        assert_eq!(f32::MAX.to_f64(), f32::MAX as f64);
    }
}
