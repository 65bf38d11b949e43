use std::io;

use thiserror::Error;

use super::header::{HEADER_LEN, MAX_PAYLOAD_LEN};

/// Failures while encoding or decoding frames.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The underlying stream failed.
    #[error("frame I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The stream ended partway through a frame.
    #[error("stream ended inside a frame after {read} of {expected} bytes")]
    Truncated {
        /// Bytes of the header or payload that were read.
        read: usize,
        /// Bytes that were required.
        expected: usize,
    },
    /// The tag byte is not a printable ASCII character.
    #[error("frame tag byte {0:#04x} is not printable ASCII")]
    InvalidTag(u8),
    /// The length field is not four hex digits.
    #[error("frame length field {0:?} is not four hex digits")]
    InvalidLength([u8; HEADER_LEN - 1]),
    /// The payload does not fit the four digit length field.
    #[error("frame payload of {0} bytes exceeds maximum {MAX_PAYLOAD_LEN}")]
    OversizedPayload(usize),
}

impl From<FrameError> for io::Error {
    fn from(error: FrameError) -> Self {
        match error {
            FrameError::Io(inner) => inner,
            FrameError::Truncated { .. } => Self::new(io::ErrorKind::UnexpectedEof, error),
            FrameError::OversizedPayload(_) => Self::new(io::ErrorKind::InvalidInput, error),
            other => Self::new(io::ErrorKind::InvalidData, other),
        }
    }
}
