//! Rolling checksum and content-defined chunking.
//!
//! The rolling checksum is a polynomial (Rabin-Karp style) hash over the last
//! `window` bytes of a stream. Sliding the window by one byte costs a single
//! multiply-add, so the checksum can be evaluated at every byte offset.
//!
//! # Algorithm
//!
//! For a window `b[1..=w]` the checksum is `sum(b[i] * M^(w - i))` in wrapping
//! 64-bit arithmetic. Sliding in `incoming` and evicting `outgoing` becomes
//! `h * M + incoming - outgoing * M^w`, where `M^w` is computed once when the
//! checksum is created.
//!
//! [`RollingWindow`] layers the chunking policy on top: a boundary is reported
//! when the window is full, the current chunk has reached the configured
//! minimum, and the upper half of the checksum, masked, equals the mask. A chunk that reaches the
//! maximum size is cut unconditionally.
//!
//! # Example
//!
//! ```rust
//! use checksums::RollingChecksum;
//!
//! let mut rolling = RollingChecksum::new(4);
//! rolling.update(b"abcd");
//! rolling.roll(b'a', b'e').unwrap();
//!
//! let mut fresh = RollingChecksum::new(4);
//! fresh.update(b"bcde");
//! assert_eq!(rolling.value(), fresh.value());
//! ```

mod checksum;
mod error;
mod window;

pub use checksum::RollingChecksum;
pub use error::{ChunkerConfigError, RollingError};
pub use window::{ChunkerConfig, RollingWindow, chunk_ends};

#[cfg(test)]
mod tests;
