use thiserror::Error;

/// Errors that can occur while updating the rolling checksum state.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum RollingError {
    /// The checksum was created with a zero-width window.
    #[error("rolling checksum requires a non-empty window")]
    EmptyWindow,
    /// A roll was attempted before the window had been filled.
    #[error("rolling checksum window holds {len} of {width} bytes")]
    WindowNotFull {
        /// Bytes observed so far.
        len: usize,
        /// Configured window width.
        width: usize,
    },
}

/// Rejected chunker parameters.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ChunkerConfigError {
    /// The rolling window must cover at least one byte.
    #[error("chunker window size must be non-zero")]
    ZeroWindow,
    /// The window must fit inside the smallest chunk.
    #[error("chunker window ({window}) exceeds minimum chunk size ({min})")]
    WindowLargerThanMinimum {
        /// Requested window size.
        window: usize,
        /// Requested minimum chunk size.
        min: usize,
    },
    /// Sizes must satisfy `min <= avg <= max`.
    #[error("chunk sizes must satisfy min ({min}) <= avg ({avg}) <= max ({max})")]
    UnorderedSizes {
        /// Requested minimum chunk size.
        min: usize,
        /// Requested average chunk size.
        avg: usize,
        /// Requested maximum chunk size.
        max: usize,
    },
}
