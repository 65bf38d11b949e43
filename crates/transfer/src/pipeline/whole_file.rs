use super::wire::Wire;
use super::TransferOutcome;
use crate::config::WHOLE_FILE_READ_SIZE;
use crate::{ByteSource, Flow, SourceKind, TransferConfig, TransferError};
use protocol::Transport;

/// Sends the source verbatim. Files are polled after every frame; metadata
/// blobs are sent without polling.
pub(super) fn send<T, S>(
    config: &TransferConfig,
    mut wire: Wire<'_, T>,
    source: &mut S,
) -> Result<TransferOutcome, TransferError>
where
    T: Transport + ?Sized,
    S: ByteSource + ?Sized,
{
    let kind = source.kind();
    let read_size = match kind {
        SourceKind::File => WHOLE_FILE_READ_SIZE,
        SourceKind::Metadata => config.chunk_size(),
    };
    let mut buf = vec![0u8; read_size];
    let mut bytes: u64 = 0;

    loop {
        let n = source
            .read_chunk(&mut buf)
            .map_err(|err| TransferError::source_unavailable(source.describe(), err))?;
        if n == 0 {
            break;
        }
        bytes += n as u64;
        let chunk = &buf[..n];
        wire.digest_plaintext(chunk);
        wire.transmit(chunk)?;
        if kind == SourceKind::File && wire.poll()? == Flow::Interrupted {
            return Ok(TransferOutcome::Interrupted {
                bytes_transferred: bytes,
            });
        }
    }

    wire.finish(bytes).map(TransferOutcome::Completed)
}
