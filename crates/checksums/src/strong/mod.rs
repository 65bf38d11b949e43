//! Strong digests carried in end-of-file records.
//!
//! [`Md5`] accumulates the 128-bit digest of a transfer incrementally; [`HexDigest`]
//! renders it in the lowercase, zero-padded form used on the wire.

mod hex;
mod md5;

pub use hex::{HexDigest, HexDigestError, encode_lower_hex};
pub use md5::{DIGEST_LEN, Md5};
