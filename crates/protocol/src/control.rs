use std::fmt;

use crate::{Command, Frame, FrameError};

/// A message the server may send while a file is being transferred.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ControlMessage {
    /// Informational problem on the server side; the transfer continues.
    Warning(String),
    /// Request to stop sending the named data path.
    Interrupt(String),
    /// Any other frame. Receiving one mid-transfer is a protocol violation.
    Unexpected {
        /// Raw tag byte of the offending frame.
        tag: u8,
        /// Payload rendered as text.
        text: String,
    },
}

impl ControlMessage {
    /// Interprets an inbound frame.
    ///
    /// Payloads are decoded as UTF-8 with invalid sequences replaced, and a
    /// trailing NUL terminator is dropped.
    #[must_use]
    pub fn decode(frame: Frame) -> Self {
        let (tag, payload) = frame.into_parts();
        let text = payload_text(&payload);
        match Command::from_u8(tag) {
            Some(Command::Warning) => Self::Warning(text),
            Some(Command::Interrupt) => Self::Interrupt(text),
            _ => Self::Unexpected { tag, text },
        }
    }

    /// Builds the frame that carries this message.
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            Self::Warning(text) => Frame::new(Command::Warning, text.as_bytes().to_vec()),
            Self::Interrupt(path) => Frame::new(Command::Interrupt, path.as_bytes().to_vec()),
            Self::Unexpected { tag, text } => Frame::from_raw(*tag, text.as_bytes().to_vec()),
        }
    }

    /// Whether this is an interrupt for exactly `path`.
    #[must_use]
    pub fn interrupts(&self, path: &str) -> bool {
        matches!(self, Self::Interrupt(target) if target == path)
    }
}

impl fmt::Display for ControlMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning(text) => write!(f, "warning: {text}"),
            Self::Interrupt(path) => write!(f, "interrupt: {path}"),
            Self::Unexpected { tag, text } => {
                write!(f, "unexpected command '{}': {text}", tag.escape_ascii())
            }
        }
    }
}

fn payload_text(payload: &[u8]) -> String {
    let trimmed = payload.strip_suffix(b"\0").unwrap_or(payload);
    String::from_utf8_lossy(trimmed).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(tag: u8, payload: &[u8]) -> Frame {
        Frame::from_raw(tag, payload.to_vec()).unwrap()
    }

    #[test]
    fn decodes_known_control_commands() {
        assert_eq!(
            ControlMessage::decode(frame(b'w', b"low disk")),
            ControlMessage::Warning("low disk".into())
        );
        assert_eq!(
            ControlMessage::decode(frame(b'i', b"t/home/user/file\0")),
            ControlMessage::Interrupt("t/home/user/file".into())
        );
    }

    #[test]
    fn everything_else_is_unexpected() {
        for tag in [b'e', b'a', b'x', b'Z'] {
            let decoded = ControlMessage::decode(frame(tag, b"boom"));
            assert_eq!(
                decoded,
                ControlMessage::Unexpected {
                    tag,
                    text: "boom".into()
                }
            );
        }
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let decoded = ControlMessage::decode(frame(b'w', &[b'o', 0xff, b'k']));
        assert_eq!(decoded, ControlMessage::Warning("o\u{fffd}k".into()));
    }

    #[test]
    fn interrupt_matching_is_exact() {
        let msg = ControlMessage::Interrupt("t/a/b".into());
        assert!(msg.interrupts("t/a/b"));
        assert!(!msg.interrupts("t/a/b/c"));
        assert!(!msg.interrupts("t/a"));
        assert!(!ControlMessage::Warning("t/a/b".into()).interrupts("t/a/b"));
    }

    #[test]
    fn to_frame_inverts_decode() {
        for msg in [
            ControlMessage::Warning("w".into()),
            ControlMessage::Interrupt("p".into()),
            ControlMessage::Unexpected {
                tag: b'e',
                text: "fatal".into(),
            },
        ] {
            assert_eq!(ControlMessage::decode(msg.to_frame().unwrap()), msg);
        }
    }

    #[test]
    fn display_names_the_kind() {
        let msg = ControlMessage::Unexpected {
            tag: b'e',
            text: "no space".into(),
        };
        assert_eq!(msg.to_string(), "unexpected command 'e': no space");
    }
}
