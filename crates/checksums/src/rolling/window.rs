use super::checksum::RollingChecksum;
use super::error::ChunkerConfigError;

/// Parameters of the content-defined chunker.
///
/// The boundary mask is derived from the average chunk size: it is
/// `avg.next_power_of_two() - 1`, applied to the upper 32 bits of the rolling
/// checksum, so a boundary fires on average once every
/// `avg.next_power_of_two()` bytes past the minimum.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawChunkerConfig"))]
pub struct ChunkerConfig {
    window: usize,
    min: usize,
    avg: usize,
    max: usize,
}

impl ChunkerConfig {
    /// Default window width in bytes.
    pub const DEFAULT_WINDOW: usize = 31;
    /// Default minimum chunk size.
    pub const DEFAULT_MIN: usize = 4 * 1024;
    /// Default average chunk size.
    pub const DEFAULT_AVG: usize = 8 * 1024;
    /// Default maximum chunk size.
    pub const DEFAULT_MAX: usize = 16 * 1024;

    /// Validates and builds a configuration.
    pub fn new(
        window: usize,
        min: usize,
        avg: usize,
        max: usize,
    ) -> Result<Self, ChunkerConfigError> {
        if window == 0 {
            return Err(ChunkerConfigError::ZeroWindow);
        }
        if window > min {
            return Err(ChunkerConfigError::WindowLargerThanMinimum { window, min });
        }
        if !(min <= avg && avg <= max) || avg > (1 << 31) {
            return Err(ChunkerConfigError::UnorderedSizes { min, avg, max });
        }
        Ok(Self {
            window,
            min,
            avg,
            max,
        })
    }

    /// Width of the rolling window.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Smallest chunk that may end on a content-defined boundary.
    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    /// Target average chunk size.
    #[must_use]
    pub const fn avg(&self) -> usize {
        self.avg
    }

    /// Size at which a chunk is cut regardless of content.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Mask applied to the rolling checksum by the boundary predicate.
    #[must_use]
    pub const fn mask(&self) -> u64 {
        (self.avg.next_power_of_two() as u64) - 1
    }
}

/// Unvalidated wire form of [`ChunkerConfig`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawChunkerConfig {
    window: usize,
    min: usize,
    avg: usize,
    max: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawChunkerConfig> for ChunkerConfig {
    type Error = ChunkerConfigError;

    fn try_from(raw: RawChunkerConfig) -> Result<Self, Self::Error> {
        Self::new(raw.window, raw.min, raw.avg, raw.max)
    }
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            window: Self::DEFAULT_WINDOW,
            min: Self::DEFAULT_MIN,
            avg: Self::DEFAULT_AVG,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// Sliding byte window that reports content-defined chunk boundaries.
///
/// The window keeps its own copy of the last `window` bytes, so the caller may
/// reuse or drop its read buffer between calls to [`advance`](Self::advance).
#[derive(Clone, Debug)]
pub struct RollingWindow {
    config: ChunkerConfig,
    data: Box<[u8]>,
    pos: usize,
    checksum: RollingChecksum,
    chunk_len: usize,
    total_bytes: u64,
}

impl RollingWindow {
    /// Creates an empty window for `config`.
    #[must_use]
    pub fn new(config: ChunkerConfig) -> Self {
        Self {
            config,
            data: vec![0u8; config.window()].into_boxed_slice(),
            pos: 0,
            checksum: RollingChecksum::new(config.window()),
            chunk_len: 0,
            total_bytes: 0,
        }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Feeds one byte and reports whether a chunk ends after it.
    ///
    /// Once the window is full the oldest byte is evicted and the checksum is
    /// rolled in constant time. A `true` result starts a new chunk; the window
    /// contents carry over so boundaries stay aligned to content.
    pub fn advance(&mut self, byte: u8) -> bool {
        let width = self.data.len();
        if self.checksum.len() < width {
            self.checksum.update(&[byte]);
        } else {
            let outgoing = self.data[self.pos];
            self.checksum.roll_full(outgoing, byte);
        }
        self.data[self.pos] = byte;
        self.pos = (self.pos + 1) % width;
        self.chunk_len += 1;
        self.total_bytes = self.total_bytes.saturating_add(1);

        if self.is_boundary() {
            logging::trace_chunk!(
                len = self.chunk_len,
                offset = self.total_bytes,
                checksum = self.checksum.value(),
                "chunk boundary"
            );
            self.chunk_len = 0;
            return true;
        }
        false
    }

    fn is_boundary(&self) -> bool {
        if self.chunk_len >= self.config.max() {
            return true;
        }
        if self.chunk_len < self.config.min() || self.checksum.len() < self.data.len() {
            return false;
        }
        // The high half mixes every bit of every byte in the window; the low
        // bits only see the low bits of the input.
        let mask = self.config.mask();
        (self.checksum.value() >> 32) & mask == mask
    }

    /// Bytes fed since the last boundary; the final chunk at end-of-stream.
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.chunk_len
    }

    /// Total bytes fed since creation or the last [`reset`](Self::reset).
    #[must_use]
    pub const fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Current rolling checksum.
    #[must_use]
    pub const fn checksum(&self) -> u64 {
        self.checksum.value()
    }

    /// Forgets all state so the window can scan an unrelated stream.
    pub fn reset(&mut self) {
        self.data.fill(0);
        self.pos = 0;
        self.checksum.reset();
        self.chunk_len = 0;
        self.total_bytes = 0;
    }
}

/// Splits `data` into content-defined chunks and returns each chunk's end
/// offset. The last entry is always `data.len()` when `data` is non-empty.
#[must_use]
pub fn chunk_ends(config: ChunkerConfig, data: &[u8]) -> Vec<usize> {
    let mut window = RollingWindow::new(config);
    let mut ends: Vec<usize> = data
        .iter()
        .enumerate()
        .filter_map(|(index, &byte)| window.advance(byte).then_some(index + 1))
        .collect();
    if window.pending() > 0 {
        ends.push(data.len());
    }
    ends
}
