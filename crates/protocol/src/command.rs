use ::core::fmt;
use ::core::str::FromStr;

use thiserror::Error;

/// Command tags carried in the first byte of every frame.
///
/// The values are the ASCII characters used on the wire so a captured stream
/// stays readable in a hex dump.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Command {
    /// A slice of file data.
    Append = b'a',
    /// End-of-file record closing a transfer.
    EndFile = b'x',
    /// Non-fatal warning from the server.
    Warning = b'w',
    /// Server request to stop sending the named path.
    Interrupt = b'i',
    /// Fatal error text from either side.
    Error = b'e',
}

/// Error returned when parsing a command from its mnemonic name fails.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown command name: \"{invalid_name}\"")]
pub struct ParseCommandError {
    invalid_name: String,
}

impl ParseCommandError {
    /// Returns the name that failed to parse.
    #[must_use]
    pub fn invalid_name(&self) -> &str {
        &self.invalid_name
    }
}

impl Command {
    /// Every command understood by this crate.
    pub const ALL: [Self; 5] = [
        Self::Append,
        Self::EndFile,
        Self::Warning,
        Self::Interrupt,
        Self::Error,
    ];

    /// Returns the tag byte written on the wire.
    #[must_use]
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Looks up a command from its wire tag.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            b'a' => Some(Self::Append),
            b'x' => Some(Self::EndFile),
            b'w' => Some(Self::Warning),
            b'i' => Some(Self::Interrupt),
            b'e' => Some(Self::Error),
            _ => None,
        }
    }

    /// Mnemonic used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Append => "APPEND",
            Self::EndFile => "END_FILE",
            Self::Warning => "WARNING",
            Self::Interrupt => "INTERRUPT",
            Self::Error => "ERROR",
        }
    }

    /// Whether the server sends this command on the control channel.
    #[must_use]
    pub const fn is_control(self) -> bool {
        matches!(self, Self::Warning | Self::Interrupt | Self::Error)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| ParseCommandError {
                invalid_name: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::from_u8(command.as_u8()), Some(command));
        }
        assert_eq!(Command::from_u8(b'q'), None);
    }

    #[test]
    fn wire_tags_are_ascii_letters() {
        assert_eq!(Command::Append.as_u8(), b'a');
        assert_eq!(Command::EndFile.as_u8(), b'x');
        assert_eq!(Command::Warning.as_u8(), b'w');
        assert_eq!(Command::Interrupt.as_u8(), b'i');
        assert_eq!(Command::Error.as_u8(), b'e');
    }

    #[test]
    fn names_parse_back() {
        for command in Command::ALL {
            assert_eq!(command.to_string().parse::<Command>(), Ok(command));
        }
        let err = "append".parse::<Command>().unwrap_err();
        assert_eq!(err.invalid_name(), "append");
    }

    #[test]
    fn control_commands() {
        assert!(!Command::Append.is_control());
        assert!(!Command::EndFile.is_control());
        assert!(Command::Warning.is_control());
        assert!(Command::Interrupt.is_control());
        assert!(Command::Error.is_control());
    }
}
