//! Per-transfer configuration.

use checksums::ChunkerConfig;
use compress::CompressionLevel;
use encryption::{CipherError, CipherKey, IvMode};
use protocol::MAX_PAYLOAD_LEN;
use thiserror::Error;
use zeroize::Zeroizing;

/// Default read size for the compressing pipeline.
pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;

/// Read size used for files in [`TransferMode::WholeFile`].
pub const WHOLE_FILE_READ_SIZE: usize = 4096;

/// How the source bytes are put on the wire.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferMode {
    /// gzip stream, optionally encrypted.
    #[default]
    Gzip,
    /// Raw bytes, neither compressed nor encrypted.
    WholeFile,
}

/// Errors raised while building a [`TransferConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Chunk size of zero.
    #[error("chunk size must be non-zero")]
    ZeroChunkSize,
    /// Chunk size larger than one frame can carry.
    #[error("chunk size {size} exceeds the frame limit of {max} bytes")]
    ChunkSizeTooLarge {
        /// Requested size.
        size: usize,
        /// Largest accepted size.
        max: usize,
    },
    /// The password cannot be used as a cipher key.
    #[error("unusable encryption password: {0}")]
    Password(#[source] CipherError),
    /// Encryption was requested for a mode that sends raw bytes.
    #[error("encryption requires the gzip transfer mode")]
    EncryptionRequiresGzip,
}

/// Settings for one transfer.
#[derive(Clone, Debug)]
pub struct TransferConfig {
    mode: TransferMode,
    compression: CompressionLevel,
    key: Option<CipherKey>,
    iv_mode: IvMode,
    chunk_size: usize,
    quick_read: bool,
    data_path: Option<String>,
    chunker: ChunkerConfig,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            mode: TransferMode::Gzip,
            compression: CompressionLevel::Default,
            key: None,
            iv_mode: IvMode::Legacy,
            chunk_size: DEFAULT_CHUNK_SIZE,
            quick_read: true,
            data_path: None,
            chunker: ChunkerConfig::default(),
        }
    }
}

impl TransferConfig {
    /// Starts a builder with default settings.
    #[must_use]
    pub fn builder() -> TransferConfigBuilder {
        TransferConfigBuilder::default()
    }

    /// Transfer mode.
    #[must_use]
    pub const fn mode(&self) -> TransferMode {
        self.mode
    }

    /// gzip level.
    #[must_use]
    pub const fn compression(&self) -> CompressionLevel {
        self.compression
    }

    /// Cipher key, present when encryption is enabled.
    #[must_use]
    pub const fn key(&self) -> Option<&CipherKey> {
        self.key.as_ref()
    }

    /// Whether the stream is encrypted.
    #[must_use]
    pub const fn encrypts(&self) -> bool {
        self.key.is_some()
    }

    /// Where the cipher IV comes from.
    #[must_use]
    pub const fn iv_mode(&self) -> IvMode {
        self.iv_mode
    }

    /// Bytes read from the source per iteration.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Whether control messages are polled between frames.
    #[must_use]
    pub const fn quick_read(&self) -> bool {
        self.quick_read
    }

    /// Path compared against interrupt requests.
    #[must_use]
    pub fn data_path(&self) -> Option<&str> {
        self.data_path.as_deref()
    }

    /// Window parameters for content-defined chunking of the same source.
    #[must_use]
    pub const fn chunker(&self) -> &ChunkerConfig {
        &self.chunker
    }

    /// Returns a copy with a different data path, keeping every other setting.
    #[must_use]
    pub fn for_data_path(&self, data_path: impl Into<String>) -> Self {
        Self {
            data_path: Some(data_path.into()),
            ..self.clone()
        }
    }
}

/// Builder for [`TransferConfig`].
#[derive(Default)]
pub struct TransferConfigBuilder {
    mode: TransferMode,
    compression: Option<CompressionLevel>,
    password: Option<Zeroizing<String>>,
    iv_mode: IvMode,
    chunk_size: Option<usize>,
    quick_read: Option<bool>,
    data_path: Option<String>,
    chunker: Option<ChunkerConfig>,
}

impl TransferConfigBuilder {
    /// Selects the transfer mode.
    pub fn mode(mut self, mode: TransferMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the gzip level.
    pub fn compression(mut self, level: CompressionLevel) -> Self {
        self.compression = Some(level);
        self
    }

    /// Enables encryption keyed by `password`.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(Zeroizing::new(password.into()));
        self
    }

    /// Selects how the cipher IV is chosen.
    pub fn iv_mode(mut self, iv_mode: IvMode) -> Self {
        self.iv_mode = iv_mode;
        self
    }

    /// Sets the number of source bytes read per iteration.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = Some(size);
        self
    }

    /// Enables or disables control-message polling.
    pub fn quick_read(mut self, enabled: bool) -> Self {
        self.quick_read = Some(enabled);
        self
    }

    /// Sets the path interrupt requests are matched against.
    pub fn data_path(mut self, path: impl Into<String>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    /// Sets the chunking window parameters.
    pub fn chunker(mut self, chunker: ChunkerConfig) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Validates the settings.
    pub fn build(self) -> Result<TransferConfig, ConfigError> {
        let chunk_size = self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if chunk_size > MAX_PAYLOAD_LEN {
            return Err(ConfigError::ChunkSizeTooLarge {
                size: chunk_size,
                max: MAX_PAYLOAD_LEN,
            });
        }

        let key = match self.password {
            Some(password) => {
                if self.mode == TransferMode::WholeFile {
                    return Err(ConfigError::EncryptionRequiresGzip);
                }
                Some(CipherKey::from_password(&password).map_err(ConfigError::Password)?)
            }
            None => None,
        };

        Ok(TransferConfig {
            mode: self.mode,
            compression: self.compression.unwrap_or_default(),
            key,
            iv_mode: self.iv_mode,
            chunk_size,
            quick_read: self.quick_read.unwrap_or(true),
            data_path: self.data_path,
            chunker: self.chunker.unwrap_or_default(),
        })
    }
}

impl std::fmt::Debug for TransferConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferConfigBuilder")
            .field("mode", &self.mode)
            .field("compression", &self.compression)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("iv_mode", &self.iv_mode)
            .field("chunk_size", &self.chunk_size)
            .field("quick_read", &self.quick_read)
            .field("data_path", &self.data_path)
            .field("chunker", &self.chunker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TransferConfig::builder().build().unwrap();
        assert_eq!(config.mode(), TransferMode::Gzip);
        assert_eq!(config.compression(), CompressionLevel::Default);
        assert!(!config.encrypts());
        assert_eq!(config.iv_mode(), IvMode::Legacy);
        assert_eq!(config.chunk_size(), DEFAULT_CHUNK_SIZE);
        assert!(config.quick_read());
        assert_eq!(config.data_path(), None);
        assert_eq!(config.chunker(), &ChunkerConfig::default());
    }

    #[test]
    fn chunker_is_carried_through() {
        let chunker = ChunkerConfig::new(16, 64, 256, 1024).unwrap();
        let config = TransferConfig::builder().chunker(chunker).build().unwrap();
        assert_eq!(config.chunker().avg(), 256);
        assert_eq!(config.for_data_path("t/x").chunker(), &chunker);
    }

    #[test]
    fn chunk_size_bounds() {
        assert!(matches!(
            TransferConfig::builder().chunk_size(0).build(),
            Err(ConfigError::ZeroChunkSize)
        ));
        assert!(matches!(
            TransferConfig::builder().chunk_size(MAX_PAYLOAD_LEN + 1).build(),
            Err(ConfigError::ChunkSizeTooLarge { .. })
        ));
        let config = TransferConfig::builder()
            .chunk_size(MAX_PAYLOAD_LEN)
            .build()
            .unwrap();
        assert_eq!(config.chunk_size(), MAX_PAYLOAD_LEN);
    }

    #[test]
    fn password_enables_encryption() {
        let config = TransferConfig::builder()
            .password("long enough")
            .build()
            .unwrap();
        assert!(config.encrypts());
        assert_eq!(config.key().map(CipherKey::len), Some(11));
    }

    #[test]
    fn bad_password_is_rejected() {
        assert!(matches!(
            TransferConfig::builder().password("abc").build(),
            Err(ConfigError::Password(CipherError::InvalidKeyLength { len: 3 }))
        ));
    }

    #[test]
    fn builder_debug_hides_password() {
        let builder = TransferConfig::builder().password("hunter22");
        assert!(!format!("{builder:?}").contains("hunter22"));
    }

    #[test]
    fn whole_file_cannot_encrypt() {
        assert!(matches!(
            TransferConfig::builder()
                .mode(TransferMode::WholeFile)
                .password("secret-key")
                .build(),
            Err(ConfigError::EncryptionRequiresGzip)
        ));
    }

    #[test]
    fn for_data_path_keeps_other_settings() {
        let base = TransferConfig::builder()
            .compression(CompressionLevel::Best)
            .quick_read(false)
            .build()
            .unwrap();
        let derived = base.for_data_path("t/some/file");
        assert_eq!(derived.data_path(), Some("t/some/file"));
        assert_eq!(derived.compression(), CompressionLevel::Best);
        assert!(!derived.quick_read());
    }
}
