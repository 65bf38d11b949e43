//! Streaming gzip compressor with bounded output chunks.

use std::io::{self, Read, Write};
use std::slice::Chunks;

use flate2::{GzBuilder, read::GzDecoder, write::GzEncoder};
use thiserror::Error;

use crate::CompressionLevel;

/// Default upper bound on a single output chunk.
pub const DEFAULT_OUTPUT_CHUNK: usize = 32 * 1024;

/// Operating system byte written into the gzip header (unix), as zlib does.
pub const HEADER_OS: u8 = 3;

fn encoder(buffer: Vec<u8>, level: CompressionLevel) -> GzEncoder<Vec<u8>> {
    GzBuilder::new()
        .operating_system(HEADER_OS)
        .write(buffer, level.into())
}

/// Failures reported by [`CompressionStage`].
#[derive(Debug, Error)]
pub enum CompressionError {
    /// The codec reported an internal error.
    #[error("gzip codec failure: {0}")]
    Codec(#[from] io::Error),
    /// The stage was used after [`CompressionStage::finish`].
    #[error("compression stream already finished")]
    Finished,
}

/// Iterator over the compressed bytes produced by one step, in pieces of at
/// most [`CompressionStage::max_output`] bytes.
pub type OutputChunks<'a> = Chunks<'a, u8>;

/// Stateful gzip compressor used once per transfer.
pub struct CompressionStage {
    encoder: GzEncoder<Vec<u8>>,
    level: CompressionLevel,
    max_output: usize,
    bytes_in: u64,
    bytes_out: u64,
    finished: bool,
}

impl std::fmt::Debug for CompressionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressionStage")
            .field("level", &self.level)
            .field("max_output", &self.max_output)
            .field("bytes_in", &self.bytes_in)
            .field("bytes_out", &self.bytes_out)
            .field("finished", &self.finished)
            .finish()
    }
}

impl CompressionStage {
    /// Starts a gzip stream at `level` with [`DEFAULT_OUTPUT_CHUNK`] output pieces.
    #[must_use]
    pub fn start(level: CompressionLevel) -> Self {
        Self::with_output_chunk(level, DEFAULT_OUTPUT_CHUNK)
    }

    /// Starts a gzip stream emitting output pieces of at most `max_output`
    /// bytes. A zero bound is raised to one byte.
    #[must_use]
    pub fn with_output_chunk(level: CompressionLevel, max_output: usize) -> Self {
        Self {
            encoder: encoder(Vec::with_capacity(max_output), level),
            level,
            max_output: max_output.max(1),
            bytes_in: 0,
            bytes_out: 0,
            finished: false,
        }
    }

    /// Level this stream was started with.
    #[must_use]
    pub const fn level(&self) -> CompressionLevel {
        self.level
    }

    /// Largest piece yielded by [`feed`](Self::feed) and [`finish`](Self::finish).
    #[must_use]
    pub const fn max_output(&self) -> usize {
        self.max_output
    }

    /// Uncompressed bytes accepted so far.
    #[must_use]
    pub const fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    /// Compressed bytes produced so far.
    #[must_use]
    pub const fn bytes_out(&self) -> u64 {
        self.bytes_out
    }

    /// Returns `true` once [`finish`](Self::finish) has succeeded.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Compresses `input` and returns whatever output the codec released.
    ///
    /// The iterator may be empty when the codec is still buffering. Output
    /// from the previous step is discarded, so callers must consume the
    /// iterator before feeding again.
    pub fn feed(&mut self, input: &[u8]) -> Result<OutputChunks<'_>, CompressionError> {
        if self.finished {
            return Err(CompressionError::Finished);
        }
        self.encoder.get_mut().clear();
        self.encoder.write_all(input)?;
        self.bytes_in = self.bytes_in.saturating_add(input.len() as u64);
        Ok(self.drain())
    }

    /// Flushes the remaining compressed bytes and the gzip trailer.
    ///
    /// The stage is spent afterwards.
    pub fn finish(&mut self) -> Result<OutputChunks<'_>, CompressionError> {
        if self.finished {
            return Err(CompressionError::Finished);
        }
        self.encoder.get_mut().clear();
        self.encoder.try_finish()?;
        self.finished = true;
        logging::trace_compress!(
            bytes_in = self.bytes_in,
            bytes_out = self.bytes_out + self.encoder.get_ref().len() as u64,
            "gzip stream finished"
        );
        Ok(self.drain())
    }

    fn drain(&mut self) -> OutputChunks<'_> {
        let pending = self.encoder.get_ref();
        self.bytes_out = self.bytes_out.saturating_add(pending.len() as u64);
        pending.chunks(self.max_output)
    }
}

/// Compresses `input` into a complete gzip member.
pub fn compress_to_vec(input: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
    let mut encoder = encoder(Vec::new(), level);
    encoder.write_all(input)?;
    encoder.finish()
}

/// Decompresses a gzip member into a new [`Vec`].
pub fn decompress_to_vec(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(input);
    let mut output = Vec::new();
    decoder.read_to_end(&mut output)?;
    Ok(output)
}
