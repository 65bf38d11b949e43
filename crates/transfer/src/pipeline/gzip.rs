use compress::CompressionStage;
use encryption::{BLOCK_LEN, CipherStage};

use super::wire::Wire;
use super::TransferOutcome;
use crate::{ByteSource, Flow, TransferConfig, TransferError};
use protocol::Transport;

pub(super) fn send<T, S>(
    config: &TransferConfig,
    mut wire: Wire<'_, T>,
    source: &mut S,
) -> Result<TransferOutcome, TransferError>
where
    T: Transport + ?Sized,
    S: ByteSource + ?Sized,
{
    let mut cipher = config
        .key()
        .map(|key| CipherStage::encryptor(key, config.iv_mode()))
        .transpose()?;
    let mut compressor = CompressionStage::with_output_chunk(config.compression(), config.chunk_size());
    let mut buf = vec![0u8; config.chunk_size()];
    let mut scratch = Vec::with_capacity(config.chunk_size() + 2 * BLOCK_LEN);
    let mut bytes: u64 = 0;

    loop {
        let n = source
            .read_chunk(&mut buf)
            .map_err(|err| TransferError::source_unavailable(source.describe(), err))?;
        if n == 0 {
            break;
        }
        bytes += n as u64;
        let input = &buf[..n];
        if cipher.is_none() {
            wire.digest_plaintext(input);
        }

        let mut polled = false;
        for piece in compressor.feed(input)? {
            polled = true;
            if wire.route(piece, cipher.as_mut(), &mut scratch)? == Flow::Interrupted {
                return Ok(TransferOutcome::Interrupted {
                    bytes_transferred: bytes,
                });
            }
        }
        // The codec may hold a whole chunk back; still give the server a
        // chance to interrupt once per read.
        if !polled && wire.poll()? == Flow::Interrupted {
            return Ok(TransferOutcome::Interrupted {
                bytes_transferred: bytes,
            });
        }
    }

    for piece in compressor.finish()? {
        if wire.route(piece, cipher.as_mut(), &mut scratch)? == Flow::Interrupted {
            return Ok(TransferOutcome::Interrupted {
                bytes_transferred: bytes,
            });
        }
    }

    if let Some(cipher) = cipher.as_mut() {
        scratch.clear();
        cipher.finalize(&mut scratch)?;
        wire.transmit_ciphertext(&scratch)?;
    }

    wire.finish(bytes).map(TransferOutcome::Completed)
}
