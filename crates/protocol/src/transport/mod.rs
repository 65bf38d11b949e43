//! The seam between the transfer pipeline and the network.

mod stream;

use std::io;

pub use stream::{InboundFrames, StreamTransport, spawn_frame_reader};

use crate::{Command, ControlMessage};

/// Message transport consumed by the transfer pipeline.
///
/// `transmit` may block until the frame is written or buffered.
/// `poll_control` must never block: it returns `Ok(None)` when nothing is
/// pending.
pub trait Transport {
    /// Sends one frame.
    fn transmit(&mut self, command: Command, payload: &[u8]) -> io::Result<()>;

    /// Returns the next inbound control message, if one has arrived.
    fn poll_control(&mut self) -> io::Result<Option<ControlMessage>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn transmit(&mut self, command: Command, payload: &[u8]) -> io::Result<()> {
        (**self).transmit(command, payload)
    }

    fn poll_control(&mut self) -> io::Result<Option<ControlMessage>> {
        (**self).poll_control()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn transmit(&mut self, command: Command, payload: &[u8]) -> io::Result<()> {
        (**self).transmit(command, payload)
    }

    fn poll_control(&mut self) -> io::Result<Option<ControlMessage>> {
        (**self).poll_control()
    }
}
