use thiserror::Error;

/// Failures of the cipher stage. All of them are fatal for the transfer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// The password does not produce a usable Blowfish key.
    #[error("encryption key must be {min}..={max} bytes, got {len}", min = crate::CipherKey::MIN_LEN, max = crate::CipherKey::MAX_LEN)]
    InvalidKeyLength {
        /// Supplied key length.
        len: usize,
    },
    /// No randomness was available for a per-transfer IV.
    #[error("could not generate a random IV: {0}")]
    RandomIv(getrandom::Error),
    /// The stage was used after [`finalize`](crate::CipherStage::finalize).
    #[error("cipher stage already finalized")]
    Finalized,
    /// Ciphertext length is not a positive multiple of the block size.
    #[error("ciphertext ends with {trailing} bytes of a partial block")]
    TruncatedCiphertext {
        /// Bytes left over after the last whole block.
        trailing: usize,
    },
    /// The final block did not carry valid PKCS#7 padding.
    #[error("invalid padding in final cipher block")]
    BadPadding,
}
