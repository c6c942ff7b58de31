use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    OutOfBounds,
    DimensionMismatch { expected: usize, actual: usize },
    EmptyInterval { axis: usize },
    IntervalTooLarge { axis: usize },
    RankTooLow { required: usize, actual: usize },
    InvalidSigma,
    InvalidClampRange,
    ChannelOutOfRange { channel: i64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {expected} axes, got {actual}"
                )
            }
            Self::EmptyInterval { axis } => write!(f, "empty interval on axis {axis}"),
            Self::IntervalTooLarge { axis } => {
                write!(f, "interval extent on axis {axis} exceeds the coordinate range")
            }
            Self::RankTooLow { required, actual } => {
                write!(f, "rank too low: need at least {required} axes, got {actual}")
            }
            Self::InvalidSigma => {
                write!(f, "sigma must be finite, >= 0 and within the kernel size limit")
            }
            Self::InvalidClampRange => write!(f, "invalid clamp range"),
            Self::ChannelOutOfRange { channel } => {
                write!(f, "channel {channel} is outside the displacement channels {{0, 1}}")
            }
        }
    }
}

impl std::error::Error for Error {}
