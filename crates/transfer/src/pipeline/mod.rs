//! Orchestration of one file transfer.
//!
//! # Ordering
//!
//! For every chunk read from the source the gzip mode:
//!
//! 1. updates the digest with the raw bytes when encryption is off,
//! 2. feeds the chunk to the compressor,
//! 3. pushes every compressed piece through the cipher when encryption is on
//!    and digests the ciphertext instead,
//! 4. transmits the result as `Append` frames,
//! 5. polls for one control message.
//!
//! At end of source the compressor trailer and the final cipher block follow
//! the same route, then the end-of-file record is sent. An interrupt skips
//! the record; a fatal error aborts without it.

mod gzip;
mod whole_file;
mod wire;

use std::path::Path;
use std::sync::Arc;

use checksums::strong::DIGEST_LEN;
use protocol::{EndFileRecord, Transport};

use crate::{
    ByteSource, Counters, FileSource, InterruptMonitor, MetadataSource, TransferConfig,
    TransferError, TransferMode,
};
use wire::Wire;

/// Summary of a completed transfer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TransferResult {
    /// Bytes read from the source.
    pub bytes_transferred: u64,
    /// Digest sent in the end-of-file record.
    pub digest: [u8; DIGEST_LEN],
}

impl TransferResult {
    /// The end-of-file record that was transmitted.
    #[must_use]
    pub fn record(&self) -> EndFileRecord {
        EndFileRecord::new(self.bytes_transferred, self.digest)
    }
}

/// How a transfer ended, short of a fatal error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransferOutcome {
    /// Every byte was sent and the end-of-file record followed.
    Completed(TransferResult),
    /// The server asked to stop; no end-of-file record was sent.
    Interrupted {
        /// Bytes read from the source before stopping.
        bytes_transferred: u64,
    },
}

impl TransferOutcome {
    /// Bytes read from the source.
    #[must_use]
    pub const fn bytes_transferred(&self) -> u64 {
        match self {
            Self::Completed(result) => result.bytes_transferred,
            Self::Interrupted { bytes_transferred } => *bytes_transferred,
        }
    }

    /// The result, if the transfer completed.
    #[must_use]
    pub const fn completed(&self) -> Option<&TransferResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Interrupted { .. } => None,
        }
    }

    /// Whether the server interrupted the transfer.
    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }
}

/// Sends sources over a [`Transport`] according to a [`TransferConfig`].
///
/// The pipeline itself is stateless between transfers: compressor, cipher
/// and digest are created for every call and dropped before it returns.
#[derive(Debug)]
pub struct TransferPipeline {
    config: TransferConfig,
    counters: Arc<Counters>,
}

impl TransferPipeline {
    /// Creates a pipeline with its own counters.
    #[must_use]
    pub fn new(config: TransferConfig) -> Self {
        Self::with_counters(config, Arc::new(Counters::new()))
    }

    /// Creates a pipeline that updates shared counters.
    #[must_use]
    pub const fn with_counters(config: TransferConfig, counters: Arc<Counters>) -> Self {
        Self { config, counters }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// Counters updated by this pipeline.
    #[must_use]
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Opens and sends the file at `path`.
    pub fn send_file<T>(&self, transport: &mut T, path: &Path) -> Result<TransferOutcome, TransferError>
    where
        T: Transport + ?Sized,
    {
        let mut source = FileSource::open(path).inspect_err(|err| log_failure(path, err))?;
        self.send(transport, &mut source)
    }

    /// Sends an in-memory metadata blob labelled `label`.
    pub fn send_metadata<T>(
        &self,
        transport: &mut T,
        data: &[u8],
        label: &str,
    ) -> Result<TransferOutcome, TransferError>
    where
        T: Transport + ?Sized,
    {
        self.send(transport, &mut MetadataSource::new(data, label))
    }

    /// Whether control messages are polled during a send.
    ///
    /// The compressing sender only polls for a named transfer; whole-file
    /// sends poll whenever `quick_read` is set.
    fn polls_control(&self) -> bool {
        self.config.quick_read()
            && (self.config.mode() == TransferMode::WholeFile || self.config.data_path().is_some())
    }

    /// Sends everything `source` yields.
    pub fn send<T, S>(&self, transport: &mut T, source: &mut S) -> Result<TransferOutcome, TransferError>
    where
        T: Transport + ?Sized,
        S: ByteSource + ?Sized,
    {
        let monitor = InterruptMonitor::new(self.config.data_path(), self.polls_control());
        let wire = Wire::new(transport, monitor, &self.counters);
        let result = match self.config.mode() {
            TransferMode::Gzip => gzip::send(&self.config, wire, source),
            TransferMode::WholeFile => whole_file::send(&self.config, wire, source),
        };

        match &result {
            Ok(TransferOutcome::Completed(done)) => {
                self.counters.record_file();
                ::tracing::debug!(
                    target: logging::targets::SEND,
                    path = %source.describe().display(),
                    bytes = done.bytes_transferred,
                    "transfer complete"
                );
            }
            Ok(TransferOutcome::Interrupted { bytes_transferred }) => {
                logging::trace_interrupt!(
                    path = %source.describe().display(),
                    bytes = bytes_transferred,
                    "transfer stopped on request"
                );
            }
            Err(err) => log_failure(source.describe(), err),
        }
        result
    }
}

fn log_failure(path: &Path, err: &TransferError) {
    ::tracing::error!(
        target: logging::targets::SEND,
        path = %path.display(),
        kind = err.kind(),
        "{err}"
    );
}
