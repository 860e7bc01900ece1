use displaydoc::Display;
use std::io;

/// A specialized result type for the led string.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur when mutating or transmitting the led string.
#[derive(Display, Debug)]
pub enum Error {
    /// Brightness {0} is outside of [0.0, 1.0].
    BrightnessOutOfRange(f32),
    /// Brightness level {0} does not fit in 5 bits.
    LevelOutOfRange(u8),
    /// Color channel {0} is outside of [0.0, 1.0].
    ChannelOutOfRange(f32),
    /// Pixel index {index} is out of range for a string of {len} pixels.
    IndexOutOfRange { index: usize, len: usize },
    /// Failed to transmit frame: {0}
    Transmission(io::Error),
    /// The led string has been closed.
    Closed,
}

impl Error {
    /// Whether a value passed by the caller fell outside of its domain.
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            Error::BrightnessOutOfRange(_)
                | Error::LevelOutOfRange(_)
                | Error::ChannelOutOfRange(_)
                | Error::IndexOutOfRange { .. }
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transmission(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Transmission(e)
    }
}
