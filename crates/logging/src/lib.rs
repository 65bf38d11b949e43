#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` centralises how the backup data path reports diagnostics. Every
//! crate in the workspace emits events through [`tracing`]; this crate fixes
//! the target names those events use, maps a numeric verbosity level onto a
//! filter directive, and installs the process-wide subscriber.
//!
//! # Design
//!
//! - Target-scoped macros ([`trace_send!`], [`trace_compress!`],
//!   [`trace_cipher!`], [`trace_interrupt!`], [`trace_chunk!`]) wrap the
//!   standard tracing macros so call-sites do not repeat target strings.
//!   Crates using them must depend on `tracing` themselves.
//! - [`VerbosityConfig`] turns `-v` style levels into an `EnvFilter`
//!   directive. `RUST_LOG` always wins when it is set.
//! - [`init_tracing`] may be called more than once: later calls report
//!   [`TracingInitError::AlreadyInitialised`] instead of panicking.
//!
//! # Examples
//!
//! ```
//! use logging::{VerbosityConfig, targets};
//!
//! let config = VerbosityConfig::from_verbose_level(2);
//! assert!(config.filter_directive().contains(targets::ROOT));
//! ```

mod config;
mod init;
mod tracing_macros;

pub use config::VerbosityConfig;
pub use init::{TracingInitError, init_tracing};

/// Tracing targets used by the backup data path.
pub mod targets {
    /// Common prefix shared by every target in the workspace.
    pub const ROOT: &str = "backup";
    /// File data leaving the sender.
    pub const SEND: &str = "backup::send";
    /// Streaming compression stage.
    pub const COMPRESS: &str = "backup::compress";
    /// Streaming cipher stage.
    pub const CIPHER: &str = "backup::cipher";
    /// Control messages polled between frames.
    pub const INTERRUPT: &str = "backup::interrupt";
    /// Content-defined chunking.
    pub const CHUNK: &str = "backup::chunk";
}
