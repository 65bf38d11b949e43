//! Frame layout and blocking read/write helpers.

mod error;
mod header;
mod io;

#[cfg(test)]
mod tests;

pub use error::FrameError;
pub use header::{FrameHeader, HEADER_LEN, MAX_PAYLOAD_LEN};
pub use io::{read_frame, write_frame};

use crate::Command;

/// A decoded frame: tag byte plus owned payload.
///
/// The tag is kept raw so frames carrying a command this crate does not know
/// can still be reported to the peer-facing layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    tag: u8,
    payload: Vec<u8>,
}

impl Frame {
    /// Builds a frame for a known command.
    pub fn new(command: Command, payload: Vec<u8>) -> Result<Self, FrameError> {
        Self::from_raw(command.as_u8(), payload)
    }

    /// Builds a frame from a raw tag byte.
    pub fn from_raw(tag: u8, payload: Vec<u8>) -> Result<Self, FrameError> {
        FrameHeader::new(tag, payload.len())?;
        Ok(Self { tag, payload })
    }

    /// Raw tag byte.
    #[must_use]
    #[inline]
    pub const fn tag(&self) -> u8 {
        self.tag
    }

    /// The command for this frame's tag, if it is one this crate knows.
    #[must_use]
    #[inline]
    pub const fn command(&self) -> Option<Command> {
        Command::from_u8(self.tag)
    }

    /// Payload bytes.
    #[must_use]
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Consumes the frame and returns the tag together with the payload.
    #[must_use]
    pub fn into_parts(self) -> (u8, Vec<u8>) {
        (self.tag, self.payload)
    }

    /// Appends the wire encoding to `out`.
    pub fn encode_into_vec(&self, out: &mut Vec<u8>) -> Result<(), FrameError> {
        let header = FrameHeader::new(self.tag, self.payload.len())?;
        out.reserve(HEADER_LEN + self.payload.len());
        out.extend_from_slice(&header.encode());
        out.extend_from_slice(&self.payload);
        Ok(())
    }
}
