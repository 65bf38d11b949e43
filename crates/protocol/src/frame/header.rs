use super::FrameError;

/// Bytes in an encoded frame header: one tag byte and four hex digits.
pub const HEADER_LEN: usize = 5;

/// Largest payload the four hex digit length field can describe.
pub const MAX_PAYLOAD_LEN: usize = 0xFFFF;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Frame header: the tag byte and the payload length.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrameHeader {
    tag: u8,
    len: u16,
}

impl FrameHeader {
    /// Validates a tag and payload length.
    pub fn new(tag: u8, payload_len: usize) -> Result<Self, FrameError> {
        if !tag.is_ascii_graphic() {
            return Err(FrameError::InvalidTag(tag));
        }
        let len =
            u16::try_from(payload_len).map_err(|_| FrameError::OversizedPayload(payload_len))?;
        Ok(Self { tag, len })
    }

    /// Tag byte.
    #[must_use]
    pub const fn tag(&self) -> u8 {
        self.tag
    }

    /// Payload length in bytes.
    #[must_use]
    pub const fn payload_len(&self) -> usize {
        self.len as usize
    }

    /// Encodes the header as the tag followed by four uppercase hex digits.
    #[must_use]
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut out = [self.tag, 0, 0, 0, 0];
        for (i, slot) in out[1..].iter_mut().enumerate() {
            let shift = 12 - 4 * i;
            *slot = HEX_UPPER[usize::from((self.len >> shift) & 0xF)];
        }
        out
    }

    /// Decodes a header. Hex digits of either case are accepted.
    pub fn decode(bytes: &[u8; HEADER_LEN]) -> Result<Self, FrameError> {
        let [tag, digits @ ..] = *bytes;
        if !tag.is_ascii_graphic() {
            return Err(FrameError::InvalidTag(tag));
        }
        let mut len: u16 = 0;
        for digit in digits {
            let nibble = match digit {
                b'0'..=b'9' => digit - b'0',
                b'A'..=b'F' => digit - b'A' + 10,
                b'a'..=b'f' => digit - b'a' + 10,
                _ => return Err(FrameError::InvalidLength(digits)),
            };
            len = (len << 4) | u16::from(nibble);
        }
        Ok(Self { tag, len })
    }
}
