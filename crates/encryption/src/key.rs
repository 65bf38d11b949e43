use std::fmt;

use zeroize::Zeroizing;

use crate::CipherError;

/// Blowfish key material taken verbatim from the configured password.
#[derive(Clone)]
pub struct CipherKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl CipherKey {
    /// Shortest key accepted by the Blowfish key schedule.
    pub const MIN_LEN: usize = 4;
    /// Longest key accepted by the Blowfish key schedule.
    pub const MAX_LEN: usize = 56;

    /// Builds a key from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CipherError> {
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&bytes.len()) {
            return Err(CipherError::InvalidKeyLength { len: bytes.len() });
        }
        Ok(Self {
            bytes: Zeroizing::new(bytes.to_vec()),
        })
    }

    /// Builds a key from a password; the key length is the password's byte length.
    pub fn from_password(password: &str) -> Result<Self, CipherError> {
        Self::from_bytes(password.as_bytes())
    }

    /// Key length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; empty keys are rejected on construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherKey")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
