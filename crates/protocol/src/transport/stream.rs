use std::io::{self, Read, Write};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, TryRecvError};

use super::Transport;
use crate::{Command, ControlMessage, Frame, FrameError, read_frame, write_frame};

/// Inbound frames as delivered by [`spawn_frame_reader`].
pub type InboundFrames = Receiver<Result<Frame, FrameError>>;

/// Starts a thread that reads frames from `reader` and forwards them over a
/// channel.
///
/// The thread stops at end of stream, after forwarding the first error, or
/// once the receiving side is dropped.
pub fn spawn_frame_reader<R>(mut reader: R) -> io::Result<(InboundFrames, JoinHandle<()>)>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::unbounded();
    let handle = thread::Builder::new()
        .name("frame-reader".into())
        .spawn(move || {
            loop {
                match read_frame(&mut reader) {
                    Ok(Some(frame)) => {
                        if tx.send(Ok(frame)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        ::tracing::debug!(target: logging::targets::INTERRUPT, error = %err, "frame reader stopped");
                        let _ = tx.send(Err(err));
                        break;
                    }
                }
            }
        })?;
    Ok((rx, handle))
}

/// [`Transport`] over a byte stream.
///
/// Outbound frames are written straight to `writer`. Inbound frames arrive on
/// a channel, normally fed by [`spawn_frame_reader`], so polling never touches
/// the socket.
pub struct StreamTransport<W> {
    writer: W,
    inbound: InboundFrames,
}

impl<W: Write> StreamTransport<W> {
    /// Wraps a writer and the receiving end of an inbound frame channel.
    pub fn new(writer: W, inbound: InboundFrames) -> Self {
        Self { writer, inbound }
    }

    /// Returns a reference to the underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the transport and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> std::fmt::Debug for StreamTransport<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamTransport")
            .field("pending", &self.inbound.len())
            .finish_non_exhaustive()
    }
}

impl<W: Write> Transport for StreamTransport<W> {
    fn transmit(&mut self, command: Command, payload: &[u8]) -> io::Result<()> {
        write_frame(&mut self.writer, command, payload)?;
        logging::trace_send!(command = command.name(), len = payload.len(), "frame written");
        Ok(())
    }

    fn poll_control(&mut self) -> io::Result<Option<ControlMessage>> {
        match self.inbound.try_recv() {
            Ok(Ok(frame)) => Ok(Some(ControlMessage::decode(frame))),
            Ok(Err(err)) => Err(err.into()),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => Ok(None),
        }
    }
}
