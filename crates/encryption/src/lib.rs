#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `encryption` implements the optional cipher stage of the backup data path:
//! Blowfish in CBC mode with PKCS#7 padding, keyed directly by the configured
//! password, processing the compressed stream in arbitrary-length pieces.
//!
//! # Design
//!
//! - [`CipherKey`] owns the password-derived key material and zeroizes it on
//!   drop. Its length (4..=56 bytes) fixes the Blowfish key schedule for the
//!   whole transfer.
//! - [`IvMode`] decides where the IV comes from. [`IvMode::Legacy`] uses the
//!   fixed [`LEGACY_IV`] that existing receivers expect;
//!   [`IvMode::RandomPrefixed`] draws a fresh IV per transfer and emits it in
//!   front of the ciphertext.
//! - [`CipherStage`] carries partial blocks between
//!   [`transform`](CipherStage::transform) calls and pads or unpads in
//!   [`finalize`](CipherStage::finalize). Output is appended to caller-owned
//!   buffers.
//!
//! # Examples
//!
//! ```
//! use encryption::{CipherKey, CipherStage, Direction, LEGACY_IV};
//!
//! # fn main() -> Result<(), encryption::CipherError> {
//! let key = CipherKey::from_password("correct horse")?;
//! let mut enc = CipherStage::start(&key, &LEGACY_IV, Direction::Encrypt)?;
//! let mut wire = Vec::new();
//! enc.transform(b"some compressed bytes", &mut wire)?;
//! enc.finalize(&mut wire)?;
//! assert_eq!(wire.len() % 8, 0);
//!
//! let mut dec = CipherStage::start(&key, &LEGACY_IV, Direction::Decrypt)?;
//! let mut plain = Vec::new();
//! dec.transform(&wire, &mut plain)?;
//! dec.finalize(&mut plain)?;
//! assert_eq!(plain, b"some compressed bytes");
//! # Ok(())
//! # }
//! ```

mod error;
mod iv;
mod key;
mod stage;

pub use error::CipherError;
pub use iv::{IvMode, LEGACY_IV, split_iv_prefix};
pub use key::CipherKey;
pub use stage::{BLOCK_LEN, CipherStage, Direction};
