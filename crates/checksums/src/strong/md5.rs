use digest::Digest;
use std::fmt;

/// Length in bytes of an MD5 digest.
pub const DIGEST_LEN: usize = 16;

/// Streaming MD5 hasher.
///
/// Fed either the plaintext or the ciphertext of a transfer, depending on
/// whether encryption is active, and finalised exactly once.
#[derive(Clone, Default)]
pub struct Md5 {
    inner: md5::Md5,
    bytes: u64,
}

impl fmt::Debug for Md5 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Md5").field("bytes", &self.bytes).finish()
    }
}

impl Md5 {
    /// Creates a hasher with an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds additional bytes into the digest state.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
        self.bytes = self.bytes.saturating_add(data.len() as u64);
    }

    /// Number of bytes hashed so far.
    #[must_use]
    pub const fn bytes_hashed(&self) -> u64 {
        self.bytes
    }

    /// Finalises the digest and returns the 128-bit MD5 output.
    #[must_use]
    pub fn finalize(self) -> [u8; DIGEST_LEN] {
        self.inner.finalize().into()
    }

    /// Convenience helper that computes the MD5 digest for `data` in one shot.
    #[must_use]
    pub fn digest(data: &[u8]) -> [u8; DIGEST_LEN] {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strong::HexDigest;

    #[test]
    fn md5_streaming_matches_rfc_vectors() {
        let vectors = [
            (b"".as_slice(), "d41d8cd98f00b204e9800998ecf8427e"),
            (b"a".as_slice(), "0cc175b9c0f1b6a831c399e269772661"),
            (b"abc".as_slice(), "900150983cd24fb0d6963f7d28e17f72"),
            (
                b"message digest".as_slice(),
                "f96b697d7cb7938d525a2f31aaf161d0",
            ),
        ];

        for (input, expected_hex) in vectors {
            let mut hasher = Md5::new();
            let mid = input.len() / 2;
            hasher.update(&input[..mid]);
            hasher.update(&input[mid..]);
            assert_eq!(hasher.bytes_hashed(), input.len() as u64);
            let digest = hasher.finalize();
            assert_eq!(HexDigest::new(digest).to_string(), expected_hex);

            let one_shot = Md5::digest(input);
            assert_eq!(one_shot, digest);
        }
    }

    #[test]
    fn chunking_does_not_change_digest() {
        let data: Vec<u8> = (0..70_000u32).map(|i| (i % 251) as u8).collect();
        let mut hasher = Md5::new();
        for piece in data.chunks(4096) {
            hasher.update(piece);
        }
        assert_eq!(hasher.finalize(), Md5::digest(&data));
    }
}
