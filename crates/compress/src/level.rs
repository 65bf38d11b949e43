//! Compression levels accepted by the gzip stage.

use std::{fmt, num::NonZeroU8, str::FromStr};

use flate2::Compression;

/// Compression levels recognised by the gzip encoder.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompressionLevel {
    /// Level 0: stored blocks inside the usual gzip framing.
    None,
    /// Favour speed over compression ratio.
    Fast,
    /// Use zlib's default balance between speed and ratio.
    #[default]
    Default,
    /// Favour the best possible compression ratio.
    Best,
    /// Use an explicit zlib compression level in the range `1..=9`.
    Precise(NonZeroU8),
}

impl CompressionLevel {
    /// Creates a level from its numeric form.
    ///
    /// `0` maps to [`CompressionLevel::None`] and `1..=9` to
    /// [`CompressionLevel::Precise`]; anything larger is rejected.
    pub fn from_numeric(level: u32) -> Result<Self, CompressionLevelError> {
        match level {
            0 => Ok(Self::None),
            1..=9 => NonZeroU8::new(level as u8)
                .map(Self::Precise)
                .ok_or(CompressionLevelError::new(level)),
            _ => Err(CompressionLevelError::new(level)),
        }
    }

    /// Returns the numeric zlib level this variant selects.
    #[must_use]
    pub fn numeric(self) -> u32 {
        Compression::from(self).level()
    }
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Self {
        match level {
            CompressionLevel::None => Compression::none(),
            CompressionLevel::Fast => Compression::fast(),
            CompressionLevel::Default => Compression::default(),
            CompressionLevel::Best => Compression::best(),
            CompressionLevel::Precise(value) => Compression::new(u32::from(value.get())),
        }
    }
}

impl FromStr for CompressionLevel {
    type Err = CompressionLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(Self::None),
            "fast" => Ok(Self::Fast),
            "default" => Ok(Self::Default),
            "best" => Ok(Self::Best),
            other => other
                .parse::<u32>()
                .map_err(|_| CompressionLevelError::new(u32::MAX))
                .and_then(Self::from_numeric),
        }
    }
}

/// Error returned when a requested compression level falls outside `0..=9`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompressionLevelError {
    level: u32,
}

impl CompressionLevelError {
    const fn new(level: u32) -> Self {
        Self { level }
    }

    /// Returns the invalid compression level that triggered the error.
    /// Unparseable text is reported as `u32::MAX`.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }
}

impl fmt::Display for CompressionLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "compression level {} is outside the supported range 0-9",
            self.level
        )
    }
}

impl std::error::Error for CompressionLevelError {}
