use core::fmt::{self, Display, Formatter};

/// A motion parameter which can't be used to drive the lead screw.
///
/// These are caller bugs. The arithmetic they would feed (a division by
/// zero, or a delay the clock can never count to) has no meaningful result,
/// so they are rejected up front and the previous configuration is kept.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Error {
    /// The distance travelled per step must be finite and strictly
    /// positive.
    InvalidDistancePerStep(f32),
    /// The requested travel rate (distance per minute) must be finite and
    /// strictly positive.
    InvalidRate(f32),
    /// The requested rate is so slow that the delay between steps doesn't
    /// fit in the 32-bit microsecond clock.
    DelayOutOfRange,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDistancePerStep(value) => write!(
                f,
                "the distance per step must be a positive number, found {}",
                value
            ),
            Error::InvalidRate(value) => write!(
                f,
                "the travel rate must be a positive number, found {}",
                value
            ),
            Error::DelayOutOfRange => {
                write!(f, "the step delay is too long for the microsecond clock")
            },
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
