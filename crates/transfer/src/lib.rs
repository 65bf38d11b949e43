#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Send-side transfer pipeline for the backup data path.
//!
//! # Overview
//!
//! A [`TransferPipeline`] reads a [`ByteSource`] (a file or an in-memory
//! metadata blob), compresses it into a gzip stream, optionally encrypts that
//! stream, and transmits it over a [`protocol::Transport`] as `Append` frames
//! followed by an end-of-file record carrying the source byte count and an
//! MD5 digest. Between frames an [`InterruptMonitor`] polls for server
//! control messages.
//!
//! # Digest
//!
//! Without encryption the digest covers the plaintext as read from the
//! source. With encryption it covers the ciphertext exactly as transmitted,
//! including a random IV prefix when [`encryption::IvMode::RandomPrefixed`] is
//! selected.
//!
//! # Outcomes
//!
//! - [`TransferOutcome::Completed`]: all bytes and the end-of-file record
//!   were sent.
//! - [`TransferOutcome::Interrupted`]: the server asked to stop this data
//!   path. Not an error; no record is sent.
//! - [`TransferError`]: fatal, nothing further is sent for this file.
//!
//! # Examples
//!
//! ```
//! use std::io;
//! use protocol::{Command, ControlMessage, Transport};
//! use transfer::{TransferConfig, TransferPipeline};
//!
//! #[derive(Default)]
//! struct Capture(Vec<(Command, Vec<u8>)>);
//!
//! impl Transport for Capture {
//!     fn transmit(&mut self, command: Command, payload: &[u8]) -> io::Result<()> {
//!         self.0.push((command, payload.to_vec()));
//!         Ok(())
//!     }
//!     fn poll_control(&mut self) -> io::Result<Option<ControlMessage>> {
//!         Ok(None)
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = TransferPipeline::new(TransferConfig::builder().build()?);
//! let mut transport = Capture::default();
//! let outcome = pipeline.send_metadata(&mut transport, b"", "meta")?;
//!
//! let (command, record) = transport.0.last().unwrap();
//! assert_eq!(*command, Command::EndFile);
//! assert_eq!(record, b"0:d41d8cd98f00b204e9800998ecf8427e");
//! assert_eq!(outcome.bytes_transferred(), 0);
//! # Ok(())
//! # }
//! ```

mod config;
mod counters;
mod error;
mod monitor;
pub mod path;
mod pipeline;
mod source;

pub use config::{
    ConfigError, DEFAULT_CHUNK_SIZE, TransferConfig, TransferConfigBuilder, TransferMode,
    WHOLE_FILE_READ_SIZE,
};
pub use counters::{Counters, CountersSnapshot};
pub use error::TransferError;
pub use monitor::{Flow, InterruptMonitor};
pub use pipeline::{TransferOutcome, TransferPipeline, TransferResult};
pub use source::{ByteSource, FileSource, MetadataSource, SourceKind};
