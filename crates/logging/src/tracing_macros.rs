//! Convenience macros for backup-specific tracing.
//!
//! These wrap the standard tracing macros with the targets declared in
//! [`crate::targets`].

/// Emit a trace for data handed to the transport.
///
/// # Example
/// ```ignore
/// trace_send!(bytes = n, "append frame");
/// ```
#[macro_export]
macro_rules! trace_send {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "backup::send", $($arg)*);
    };
}

/// Emit a compression stage trace.
#[macro_export]
macro_rules! trace_compress {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "backup::compress", $($arg)*);
    };
}

/// Emit a cipher stage trace.
#[macro_export]
macro_rules! trace_cipher {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "backup::cipher", $($arg)*);
    };
}

/// Emit a control-message trace.
///
/// Interrupt requests are cooperative, so they are reported at `info`.
#[macro_export]
macro_rules! trace_interrupt {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "backup::interrupt", $($arg)*);
    };
}

/// Emit a chunk boundary trace.
#[macro_export]
macro_rules! trace_chunk {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "backup::chunk", $($arg)*);
    };
}
