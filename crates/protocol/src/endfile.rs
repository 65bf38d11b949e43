use std::fmt;
use std::str::FromStr;

use checksums::strong::{DIGEST_LEN, HexDigest, HexDigestError};
use thiserror::Error;

/// The record sent as the last frame of a completed transfer:
/// `"<byte_count>:<32 lowercase hex digits>"`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EndFileRecord {
    bytes: u64,
    digest: HexDigest,
}

/// Error returned when an end-of-file record cannot be parsed.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum EndFileParseError {
    /// No `:` separates the count from the digest.
    #[error("end-of-file record has no ':' separator")]
    MissingSeparator,
    /// The byte count is not a plain decimal number.
    #[error("invalid byte count {0:?} in end-of-file record")]
    InvalidByteCount(String),
    /// The digest is not 32 lowercase hex digits.
    #[error("invalid digest in end-of-file record: {0}")]
    Digest(#[from] HexDigestError),
}

impl EndFileRecord {
    /// Builds a record from the source byte count and the final digest.
    #[must_use]
    pub fn new(bytes: u64, digest: impl Into<HexDigest>) -> Self {
        Self {
            bytes,
            digest: digest.into(),
        }
    }

    /// Bytes read from the source.
    #[must_use]
    pub const fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Digest carried in the record.
    #[must_use]
    pub const fn digest(&self) -> &HexDigest {
        &self.digest
    }

    /// Raw digest bytes.
    #[must_use]
    pub const fn digest_bytes(&self) -> &[u8; DIGEST_LEN] {
        self.digest.bytes()
    }

    /// Parses the textual record.
    pub fn parse(text: &str) -> Result<Self, EndFileParseError> {
        let (count, digest) = text
            .split_once(':')
            .ok_or(EndFileParseError::MissingSeparator)?;
        if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EndFileParseError::InvalidByteCount(count.to_owned()));
        }
        let bytes = count
            .parse()
            .map_err(|_| EndFileParseError::InvalidByteCount(count.to_owned()))?;
        Ok(Self {
            bytes,
            digest: digest.parse()?,
        })
    }

    /// Encodes the record as a frame payload.
    #[must_use]
    pub fn to_payload(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for EndFileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.bytes, self.digest)
    }
}

impl FromStr for EndFileRecord {
    type Err = EndFileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checksums::strong::Md5;

    #[test]
    fn renders_count_and_lowercase_digest() {
        let record = EndFileRecord::new(70_000, Md5::digest(&[0xAB; 70_000]));
        let text = record.to_string();
        let (count, hex) = text.split_once(':').unwrap();
        assert_eq!(count, "70000");
        assert_eq!(hex.len(), 32);
        assert!(hex.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
        assert_eq!(record.to_payload(), text.into_bytes());
    }

    #[test]
    fn parse_inverts_display() {
        let record = EndFileRecord::new(12_345, Md5::digest(b"abc"));
        let parsed: EndFileRecord = record.to_string().parse().unwrap();
        assert_eq!(parsed, record);
        assert_eq!(parsed.bytes(), 12_345);
        assert_eq!(parsed.digest_bytes(), &Md5::digest(b"abc"));
    }

    #[test]
    fn rejects_malformed_records() {
        let hex = "d41d8cd98f00b204e9800998ecf8427e";
        assert_eq!(
            EndFileRecord::parse(hex),
            Err(EndFileParseError::MissingSeparator)
        );
        assert!(matches!(
            EndFileRecord::parse(&format!(":{hex}")),
            Err(EndFileParseError::InvalidByteCount(_))
        ));
        assert!(matches!(
            EndFileRecord::parse(&format!("+5:{hex}")),
            Err(EndFileParseError::InvalidByteCount(_))
        ));
        assert!(matches!(
            EndFileRecord::parse(&format!("99999999999999999999999:{hex}")),
            Err(EndFileParseError::InvalidByteCount(_))
        ));
        assert!(matches!(
            EndFileRecord::parse("0:d41d8cd9"),
            Err(EndFileParseError::Digest(HexDigestError::Length { .. }))
        ));
        assert!(matches!(
            EndFileRecord::parse("0:D41D8CD98F00B204E9800998ECF8427E"),
            Err(EndFileParseError::Digest(HexDigestError::InvalidDigit { .. }))
        ));
    }
}
