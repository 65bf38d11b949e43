use std::fmt::{self, Write as _};
use std::str::FromStr;

use thiserror::Error;

use super::md5::DIGEST_LEN;

/// Appends the lowercase, zero-padded hex form of `bytes` to `out`.
///
/// Writes into a caller-owned buffer so repeated formatting can reuse storage.
pub fn encode_lower_hex(bytes: &[u8], out: &mut String) {
    out.reserve(bytes.len() * 2);
    for byte in bytes {
        // Writing into a String cannot fail.
        let _ = write!(out, "{byte:02x}");
    }
}

/// A 128-bit digest that renders as 32 lowercase hex characters.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct HexDigest([u8; DIGEST_LEN]);

impl HexDigest {
    /// Wraps raw digest bytes.
    #[must_use]
    pub const fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw digest bytes.
    #[must_use]
    pub const fn bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl From<[u8; DIGEST_LEN]> for HexDigest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for HexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a hex digest fails.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum HexDigestError {
    /// The text was not exactly 32 characters long.
    #[error("hex digest must be {expected} characters, got {len}")]
    Length {
        /// Required length.
        expected: usize,
        /// Supplied length.
        len: usize,
    },
    /// A character outside `[0-9a-f]` was found.
    #[error("invalid hex digit {found:?} at offset {offset}")]
    InvalidDigit {
        /// Offending character.
        found: char,
        /// Character offset within the input.
        offset: usize,
    },
}

impl FromStr for HexDigest {
    type Err = HexDigestError;

    /// Parses the lowercase form produced by [`fmt::Display`]. Uppercase
    /// digits are rejected because the wire format never produces them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != DIGEST_LEN * 2 {
            return Err(HexDigestError::Length {
                expected: DIGEST_LEN * 2,
                len: s.len(),
            });
        }

        let mut bytes = [0u8; DIGEST_LEN];
        for (offset, ch) in s.char_indices() {
            let nibble = match ch {
                '0'..='9' => ch as u8 - b'0',
                'a'..='f' => ch as u8 - b'a' + 10,
                found => return Err(HexDigestError::InvalidDigit { found, offset }),
            };
            let slot = &mut bytes[offset / 2];
            *slot = if offset % 2 == 0 {
                nibble << 4
            } else {
                *slot | nibble
            };
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_zero_padded_lowercase() {
        let mut bytes = [0u8; DIGEST_LEN];
        bytes[0] = 0x0a;
        bytes[15] = 0xff;
        let text = HexDigest::new(bytes).to_string();
        assert_eq!(text, "0a0000000000000000000000000000ff");
        assert_eq!(text.len(), 32);
    }

    #[test]
    fn encode_appends_to_existing_buffer() {
        let mut out = String::from("123:");
        encode_lower_hex(&[0x00, 0xab, 0x10], &mut out);
        assert_eq!(out, "123:00ab10");
    }

    #[test]
    fn parse_inverts_display() {
        let bytes: [u8; DIGEST_LEN] = core::array::from_fn(|i| (i * 17) as u8);
        let digest = HexDigest::new(bytes);
        let parsed: HexDigest = digest.to_string().parse().expect("parse");
        assert_eq!(parsed, digest);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        let err = "abc".parse::<HexDigest>().unwrap_err();
        assert_eq!(err, HexDigestError::Length { expected: 32, len: 3 });
    }

    #[test]
    fn parse_rejects_uppercase_and_non_hex() {
        let upper = "D41D8CD98F00B204E9800998ECF8427E";
        assert!(matches!(
            upper.parse::<HexDigest>(),
            Err(HexDigestError::InvalidDigit { offset: 0, .. })
        ));
        let junk = "d41d8cd98f00b204e9800998ecf8427g";
        assert!(matches!(
            junk.parse::<HexDigest>(),
            Err(HexDigestError::InvalidDigit { found: 'g', offset: 31 })
        ));
    }
}
