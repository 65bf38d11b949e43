#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Test doubles and fixtures shared by the workspace's integration tests.
//!
//! [`ScriptedTransport`] records every frame the pipeline transmits and hands
//! out pre-arranged control messages when polled, optionally only after a
//! given number of polls so a test can interrupt a transfer midway.

mod fixtures;
mod transport;

pub use fixtures::{incompressible, repeated, temp_file_with};
pub use transport::{ScriptedTransport, SentFrame};
