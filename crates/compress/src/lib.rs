#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `compress` provides the compression stage of the backup data path: a
//! stateful gzip (DEFLATE) compressor that accepts the source one read buffer
//! at a time and hands back compressed output in bounded-size pieces.
//!
//! # Design
//!
//! [`CompressionStage`] wraps a [`flate2`] gzip encoder writing into an owned
//! scratch vector. Each [`feed`](CompressionStage::feed) clears the scratch,
//! pushes the input through the encoder and returns an iterator over the
//! produced bytes split into chunks of at most
//! [`max_output`](CompressionStage::max_output) bytes. Nothing is retained
//! between calls except the codec's own window, so memory stays bounded by
//! the read buffer size plus codec overhead.
//!
//! # Invariants
//!
//! - Level `0` ([`CompressionLevel::None`]) still produces a gzip stream made
//!   of stored blocks, so receivers never special-case uncompressed data.
//! - The stream is finalised exactly once through
//!   [`finish`](CompressionStage::finish); later calls report
//!   [`CompressionError::Finished`].
//! - Codec failures surface as [`CompressionError::Codec`] and are never
//!   retried.
//!
//! # Examples
//!
//! ```
//! use compress::{CompressionLevel, CompressionStage, decompress_to_vec};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut stage = CompressionStage::start(CompressionLevel::Default);
//! let mut wire = Vec::new();
//! for chunk in stage.feed(b"streaming example payload")? {
//!     wire.extend_from_slice(chunk);
//! }
//! for chunk in stage.finish()? {
//!     wire.extend_from_slice(chunk);
//! }
//! assert_eq!(decompress_to_vec(&wire)?, b"streaming example payload");
//! # Ok(())
//! # }
//! ```

mod level;
mod stage;

pub use level::{CompressionLevel, CompressionLevelError};
pub use stage::{
    CompressionError, CompressionStage, DEFAULT_OUTPUT_CHUNK, HEADER_OS, OutputChunks,
    compress_to_vec, decompress_to_vec,
};
