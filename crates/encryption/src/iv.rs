use crate::{BLOCK_LEN, CipherError};

/// IV baked into the legacy protocol. Every encrypted transfer under the same
/// password shares it, which leaks equality of leading blocks.
pub const LEGACY_IV: [u8; BLOCK_LEN] = *b"[lkd.$G\xa3";

/// Where a transfer's IV comes from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IvMode {
    /// Fixed [`LEGACY_IV`], wire compatible with existing receivers.
    #[default]
    Legacy,
    /// Fresh random IV per transfer, sent as the first ciphertext block.
    RandomPrefixed,
}

impl IvMode {
    /// Produces the IV for one transfer.
    pub fn resolve(self) -> Result<[u8; BLOCK_LEN], CipherError> {
        match self {
            Self::Legacy => Ok(LEGACY_IV),
            Self::RandomPrefixed => {
                let mut iv = [0u8; BLOCK_LEN];
                getrandom::fill(&mut iv).map_err(CipherError::RandomIv)?;
                Ok(iv)
            }
        }
    }

    /// Whether the IV travels in front of the ciphertext.
    #[must_use]
    pub const fn is_prefixed(self) -> bool {
        matches!(self, Self::RandomPrefixed)
    }
}

/// Splits a [`IvMode::RandomPrefixed`] stream into its IV and ciphertext.
#[must_use]
pub fn split_iv_prefix(stream: &[u8]) -> Option<([u8; BLOCK_LEN], &[u8])> {
    let (head, rest) = stream.split_first_chunk::<BLOCK_LEN>()?;
    Some((*head, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_iv_is_one_block() {
        assert_eq!(LEGACY_IV.len(), BLOCK_LEN);
        assert_eq!(IvMode::Legacy.resolve().unwrap(), LEGACY_IV);
        assert!(!IvMode::Legacy.is_prefixed());
    }

    #[test]
    fn random_ivs_differ() {
        let a = IvMode::RandomPrefixed.resolve().unwrap();
        let b = IvMode::RandomPrefixed.resolve().unwrap();
        assert_ne!(a, b);
        assert!(IvMode::RandomPrefixed.is_prefixed());
    }

    #[test]
    fn split_requires_a_whole_block() {
        assert!(split_iv_prefix(&[1, 2, 3]).is_none());
        let (iv, rest) = split_iv_prefix(b"01234567tail").unwrap();
        assert_eq!(&iv, b"01234567");
        assert_eq!(rest, b"tail");
    }
}
