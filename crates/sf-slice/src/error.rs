use core::convert::Infallible;
use core::fmt;

use sf_core::Error;

/// Failure of a slice-processing call: either a field/parameter error from
/// the engine or the operator's own error, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessError<E> {
    Field(Error),
    Operator(E),
}

impl<E> From<Error> for ProcessError<E> {
    fn from(err: Error) -> Self {
        Self::Field(err)
    }
}

impl From<ProcessError<Infallible>> for Error {
    fn from(err: ProcessError<Infallible>) -> Self {
        match err {
            ProcessError::Field(e) => e,
            ProcessError::Operator(never) => match never {},
        }
    }
}

impl<E: fmt::Display> fmt::Display for ProcessError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(e) => write!(f, "{e}"),
            Self::Operator(e) => write!(f, "slice operator failed: {e}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for ProcessError<E> {}
