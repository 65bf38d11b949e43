//! Failure taxonomy for a single transfer.
//!
//! Every variant is fatal: the pipeline tears down its compressor, cipher and
//! source before returning it, and no end-of-file record is sent. A matching
//! interrupt request is not an error and is reported through
//! [`TransferOutcome::Interrupted`](crate::TransferOutcome::Interrupted).

use std::io;
use std::path::PathBuf;

use compress::CompressionError;
use encryption::CipherError;
use thiserror::Error;

/// Fatal failures of one transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The source could not be opened or read.
    #[error("could not read {}: {source}", path.display())]
    SourceUnavailable {
        /// Source path, or a placeholder for in-memory sources.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The gzip codec failed.
    #[error("compression failure: {0}")]
    CompressionFailure(#[from] CompressionError),

    /// The cipher could not be set up or rejected its input.
    #[error("encryption failure: {0}")]
    CipherFailure(#[from] CipherError),

    /// The transport failed while sending or polling.
    #[error("transmission failure: {0}")]
    TransmissionFailure(#[source] io::Error),

    /// The peer sent a control message that is not allowed mid-transfer.
    #[error("unexpected control message '{}': {text}", command.escape_ascii())]
    UnexpectedControlMessage {
        /// Raw command tag.
        command: u8,
        /// Message text.
        text: String,
    },
}

impl TransferError {
    pub(crate) fn source_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Short stable name of the failure kind, used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => "source_unavailable",
            Self::CompressionFailure(_) => "compression_failure",
            Self::CipherFailure(_) => "cipher_failure",
            Self::TransmissionFailure(_) => "transmission_failure",
            Self::UnexpectedControlMessage { .. } => "unexpected_control_message",
        }
    }
}
