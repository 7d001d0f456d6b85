//! Error types.
use core::fmt;

#[cfg(feature = "std")]
use std::error;

/// A requested seek is not supported by the cipher mode.
///
/// Counter-mode seeks are validated before any state is touched, so a
/// rejected seek leaves the engine exactly where it was.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SeekError {
    /// The byte offset is not a multiple of the cipher block size.
    NotBlockAligned,
    /// A negative relative offset was given; the engine only moves forward.
    NegativeOffset,
    /// The seek is relative to the end of the stream, whose length the
    /// engine does not know.
    FromEnd,
}

impl fmt::Display for SeekError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeekError::NotBlockAligned => {
                "seek offset is not a multiple of the cipher block size"
            }
            SeekError::NegativeOffset => "negative relative seeks are not supported",
            SeekError::FromEnd => "seeking relative to the end of the stream is not supported",
        })
    }
}

#[cfg(feature = "std")]
impl error::Error for SeekError {}
