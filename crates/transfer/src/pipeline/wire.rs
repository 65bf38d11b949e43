use checksums::strong::Md5;
use encryption::CipherStage;
use protocol::{Command, EndFileRecord, MAX_PAYLOAD_LEN, Transport};

use super::TransferResult;
use crate::{Counters, Flow, InterruptMonitor, TransferError};

/// Outbound half of a transfer: digest, transport and interrupt monitor.
pub(super) struct Wire<'a, T: ?Sized> {
    transport: &'a mut T,
    monitor: InterruptMonitor<'a>,
    counters: &'a Counters,
    digest: Md5,
}

impl<'a, T: Transport + ?Sized> Wire<'a, T> {
    pub(super) fn new(
        transport: &'a mut T,
        monitor: InterruptMonitor<'a>,
        counters: &'a Counters,
    ) -> Self {
        Self {
            transport,
            monitor,
            counters,
            digest: Md5::new(),
        }
    }

    pub(super) fn digest_plaintext(&mut self, bytes: &[u8]) {
        self.digest.update(bytes);
    }

    /// Sends `payload` as one or more `Append` frames.
    pub(super) fn transmit(&mut self, payload: &[u8]) -> Result<(), TransferError> {
        for frame in payload.chunks(MAX_PAYLOAD_LEN) {
            self.transport
                .transmit(Command::Append, frame)
                .map_err(TransferError::TransmissionFailure)?;
            self.counters.add_sent(frame.len());
            logging::trace_send!(len = frame.len(), "append");
        }
        Ok(())
    }

    /// Sends ciphertext and folds it into the digest.
    pub(super) fn transmit_ciphertext(&mut self, ciphertext: &[u8]) -> Result<(), TransferError> {
        if ciphertext.is_empty() {
            return Ok(());
        }
        self.transmit(ciphertext)?;
        self.digest.update(ciphertext);
        Ok(())
    }

    /// Routes one compressed piece to the transport and polls once.
    pub(super) fn route(
        &mut self,
        piece: &[u8],
        cipher: Option<&mut CipherStage>,
        scratch: &mut Vec<u8>,
    ) -> Result<Flow, TransferError> {
        match cipher {
            Some(cipher) => {
                scratch.clear();
                cipher.transform(piece, scratch)?;
                self.transmit_ciphertext(scratch)?;
            }
            None => self.transmit(piece)?,
        }
        self.poll()
    }

    pub(super) fn poll(&mut self) -> Result<Flow, TransferError> {
        self.monitor.check(&mut *self.transport, self.counters)
    }

    /// Finalizes the digest and sends the end-of-file record.
    pub(super) fn finish(self, bytes_transferred: u64) -> Result<TransferResult, TransferError> {
        let digest = self.digest.finalize();
        let record = EndFileRecord::new(bytes_transferred, digest);
        self.transport
            .transmit(Command::EndFile, &record.to_payload())
            .map_err(TransferError::TransmissionFailure)?;
        logging::trace_send!(record = %record, "end of file");
        Ok(TransferResult {
            bytes_transferred,
            digest,
        })
    }
}
