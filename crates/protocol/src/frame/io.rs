use std::io::{self, Read, Write};

use super::{Frame, FrameError, FrameHeader, HEADER_LEN};
use crate::Command;

/// Writes one frame to `writer`.
///
/// Header and payload go out in a single `write_all` so frames from one
/// writer never interleave at the byte level.
pub fn write_frame<W: Write + ?Sized>(
    writer: &mut W,
    command: Command,
    payload: &[u8],
) -> Result<(), FrameError> {
    let header = FrameHeader::new(command.as_u8(), payload.len())?;
    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.extend_from_slice(&header.encode());
    buf.extend_from_slice(payload);
    writer.write_all(&buf)?;
    Ok(())
}

/// Reads the next frame from `reader`.
///
/// Returns `Ok(None)` when the stream ends cleanly on a frame boundary. An
/// end of stream anywhere else is [`FrameError::Truncated`].
pub fn read_frame<R: Read + ?Sized>(reader: &mut R) -> Result<Option<Frame>, FrameError> {
    let mut header = [0u8; HEADER_LEN];
    let read = read_until_full(reader, &mut header)?;
    if read == 0 {
        return Ok(None);
    }
    if read < HEADER_LEN {
        return Err(FrameError::Truncated {
            read,
            expected: HEADER_LEN,
        });
    }

    let header = FrameHeader::decode(&header)?;
    let mut payload = vec![0u8; header.payload_len()];
    let read = read_until_full(reader, &mut payload)?;
    if read < payload.len() {
        return Err(FrameError::Truncated {
            read,
            expected: payload.len(),
        });
    }
    Frame::from_raw(header.tag(), payload).map(Some)
}

fn read_until_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
