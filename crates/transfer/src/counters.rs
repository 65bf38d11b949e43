//! Observability counters shared across transfers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Running totals updated by the pipeline and the interrupt monitor.
#[derive(Debug, Default)]
pub struct Counters {
    warnings: AtomicU64,
    sent_bytes: AtomicU64,
    files: AtomicU64,
}

/// Point-in-time copy of [`Counters`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CountersSnapshot {
    /// Warning control messages received.
    pub warnings: u64,
    /// Payload bytes handed to the transport.
    pub sent_bytes: u64,
    /// Transfers that completed with an end-of-file record.
    pub files: u64,
}

impl Counters {
    /// Creates zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            warnings: AtomicU64::new(0),
            sent_bytes: AtomicU64::new(0),
            files: AtomicU64::new(0),
        }
    }

    pub(crate) fn record_warning(&self) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_sent(&self, bytes: usize) {
        self.sent_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_file(&self) {
        self.files.fetch_add(1, Ordering::Relaxed);
    }

    /// Warning control messages received so far.
    #[must_use]
    pub fn warnings(&self) -> u64 {
        self.warnings.load(Ordering::Relaxed)
    }

    /// Reads every counter.
    #[must_use]
    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            warnings: self.warnings.load(Ordering::Relaxed),
            sent_bytes: self.sent_bytes.load(Ordering::Relaxed),
            files: self.files.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_updates() {
        let counters = Counters::new();
        counters.record_warning();
        counters.record_warning();
        counters.add_sent(100);
        counters.add_sent(28);
        counters.record_file();
        assert_eq!(
            counters.snapshot(),
            CountersSnapshot {
                warnings: 2,
                sent_bytes: 128,
                files: 1,
            }
        );
        assert_eq!(counters.warnings(), 2);
    }
}
