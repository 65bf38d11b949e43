//! Verbosity configuration mapped onto tracing filter directives.

use crate::targets;

/// Verbosity selected by the caller, usually from repeated `-v` flags.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    level: u8,
}

impl VerbosityConfig {
    /// Highest level that changes the emitted directive.
    pub const MAX_LEVEL: u8 = 3;

    /// Creates a configuration from a verbose level. Levels above
    /// [`MAX_LEVEL`](Self::MAX_LEVEL) are clamped.
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        let level = if level > Self::MAX_LEVEL {
            Self::MAX_LEVEL
        } else {
            level
        };
        Self { level }
    }

    /// Returns the effective verbose level.
    #[must_use]
    pub const fn level(self) -> u8 {
        self.level
    }

    /// Returns the `EnvFilter` directive for this level.
    ///
    /// - `0`: warnings and errors only
    /// - `1`: informational events, including cooperative interrupts
    /// - `2`: debug output for the data path
    /// - `3`: per-frame trace output for the data path
    #[must_use]
    pub fn filter_directive(self) -> String {
        match self.level {
            0 => "warn".to_owned(),
            1 => "info".to_owned(),
            2 => format!("info,{}=debug", targets::ROOT),
            _ => format!("debug,{}=trace", targets::ROOT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_quiet() {
        assert_eq!(VerbosityConfig::default().filter_directive(), "warn");
    }

    #[test]
    fn levels_are_clamped() {
        let config = VerbosityConfig::from_verbose_level(9);
        assert_eq!(config.level(), VerbosityConfig::MAX_LEVEL);
        assert_eq!(config.filter_directive(), "debug,backup=trace");
    }

    #[test]
    fn level_two_enables_data_path_debug() {
        let directive = VerbosityConfig::from_verbose_level(2).filter_directive();
        assert_eq!(directive, "info,backup=debug");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let config = VerbosityConfig::from_verbose_level(1);
        let json = serde_json::to_string(&config).expect("serialize");
        let back: VerbosityConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }
}
