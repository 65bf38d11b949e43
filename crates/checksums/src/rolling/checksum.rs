use super::error::RollingError;

/// Multiplier of the polynomial hash (the 64-bit FNV prime).
const MULTIPLIER: u64 = 0x0000_0100_0000_01b3;

/// Polynomial rolling checksum over a window of fixed width.
///
/// The width only matters once the caller starts rolling: [`update`](Self::update)
/// accepts any number of bytes, while [`roll`](Self::roll) assumes exactly
/// `width` bytes are currently covered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RollingChecksum {
    hash: u64,
    len: usize,
    width: usize,
    /// `MULTIPLIER^width`, the weight of the byte leaving the window.
    evict_weight: u64,
}

impl RollingChecksum {
    /// Creates a zeroed checksum for windows of `width` bytes.
    #[must_use]
    pub fn new(width: usize) -> Self {
        let mut evict_weight = 1u64;
        for _ in 0..width {
            evict_weight = evict_weight.wrapping_mul(MULTIPLIER);
        }
        Self {
            hash: 0,
            len: 0,
            width,
            evict_weight,
        }
    }

    /// Resets the checksum back to its initial state, keeping the width.
    pub fn reset(&mut self) {
        self.hash = 0;
        self.len = 0;
    }

    /// Returns the number of bytes that contributed to the current state.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no bytes have been observed yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the window width this checksum rolls over.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Appends bytes without evicting anything.
    #[inline]
    pub fn update(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            self.push(byte);
        }
        self.len = self.len.saturating_add(chunk.len());
    }

    #[inline]
    fn push(&mut self, byte: u8) {
        self.hash = self
            .hash
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(u64::from(byte));
    }

    /// Slides the window by one byte: `outgoing` leaves, `incoming` enters.
    #[inline]
    pub fn roll(&mut self, outgoing: u8, incoming: u8) -> Result<(), RollingError> {
        if self.width == 0 {
            return Err(RollingError::EmptyWindow);
        }
        if self.len < self.width {
            return Err(RollingError::WindowNotFull {
                len: self.len,
                width: self.width,
            });
        }
        self.roll_full(outgoing, incoming);
        Ok(())
    }

    /// [`roll`](Self::roll) for callers that already keep the window full.
    #[inline]
    pub(super) fn roll_full(&mut self, outgoing: u8, incoming: u8) {
        debug_assert!(self.width > 0 && self.len >= self.width);
        self.push(incoming);
        self.hash = self
            .hash
            .wrapping_sub(u64::from(outgoing).wrapping_mul(self.evict_weight));
    }

    /// Returns the current checksum.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.hash
    }
}
