//! Global subscriber installation.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::VerbosityConfig;

/// Errors reported by [`init_tracing`].
#[derive(Debug, Error)]
pub enum TracingInitError {
    /// The verbosity directive could not be parsed.
    #[error("invalid tracing filter directive: {0}")]
    InvalidDirective(#[from] tracing_subscriber::filter::ParseError),
    /// A global subscriber was already installed.
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialised,
}

/// Installs a formatted stderr subscriber filtered according to `config`.
///
/// `RUST_LOG` overrides the directive derived from `config` when it is set and
/// parses successfully.
pub fn init_tracing(config: VerbosityConfig) -> Result<(), TracingInitError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.filter_directive())?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| TracingInitError::AlreadyInitialised)
}
