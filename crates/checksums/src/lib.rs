#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `checksums` provides the two hashing primitives used by the backup data
//! path:
//!
//! - [`RollingWindow`], a fixed-size sliding window over a byte stream whose
//!   rolling checksum selects content-defined chunk boundaries for
//!   deduplication.
//! - [`strong::Md5`], the incremental 128-bit digest carried in end-of-file
//!   records, together with the lowercase hex rendering used on the wire.
//!
//! # Examples
//!
//! ```
//! use checksums::{ChunkerConfig, RollingWindow};
//!
//! let config = ChunkerConfig::new(16, 64, 128, 256).unwrap();
//! let mut window = RollingWindow::new(config);
//! let data = vec![7u8; 1000];
//! let cuts: Vec<usize> = data
//!     .iter()
//!     .enumerate()
//!     .filter_map(|(i, &b)| window.advance(b).then_some(i + 1))
//!     .collect();
//! assert!(cuts.iter().all(|&end| end > 0));
//! ```

mod rolling;
pub mod strong;

pub use rolling::{
    ChunkerConfig, ChunkerConfigError, RollingChecksum, RollingError, RollingWindow, chunk_ends,
};
