use blowfish::Blowfish;
use cipher::generic_array::GenericArray;
use cipher::{BlockDecryptMut, BlockEncryptMut, InnerIvInit, KeyInit};
use zeroize::Zeroize;

use crate::{CipherError, CipherKey, IvMode};

/// Blowfish block size in bytes.
pub const BLOCK_LEN: usize = 8;

/// Direction a [`CipherStage`] runs in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Plaintext in, ciphertext out.
    Encrypt,
    /// Ciphertext in, plaintext out.
    Decrypt,
}

enum Mode {
    Encrypt(cbc::Encryptor<Blowfish>),
    Decrypt(cbc::Decryptor<Blowfish>),
}

/// Streaming Blowfish-CBC transform used once per transfer.
///
/// Whole blocks are processed as soon as they are available; the remainder
/// waits in an internal carry buffer. When decrypting, the last whole block is
/// also held back because it may carry the padding.
pub struct CipherStage {
    mode: Mode,
    iv: [u8; BLOCK_LEN],
    carry: [u8; BLOCK_LEN],
    carry_len: usize,
    prefix_pending: bool,
    finalized: bool,
}

impl std::fmt::Debug for CipherStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherStage")
            .field("direction", &self.direction())
            .field("carry_len", &self.carry_len)
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}

impl CipherStage {
    /// Initialises key schedule and chaining state.
    pub fn start(
        key: &CipherKey,
        iv: &[u8; BLOCK_LEN],
        direction: Direction,
    ) -> Result<Self, CipherError> {
        let cipher = Blowfish::new_from_slice(key.expose())
            .map_err(|_| CipherError::InvalidKeyLength { len: key.len() })?;
        let iv_block = GenericArray::from_slice(iv);
        let mode = match direction {
            Direction::Encrypt => Mode::Encrypt(cbc::Encryptor::inner_iv_init(cipher, iv_block)),
            Direction::Decrypt => Mode::Decrypt(cbc::Decryptor::inner_iv_init(cipher, iv_block)),
        };
        logging::trace_cipher!(?direction, key_len = key.len(), "cipher stage started");
        Ok(Self {
            mode,
            iv: *iv,
            carry: [0u8; BLOCK_LEN],
            carry_len: 0,
            prefix_pending: false,
            finalized: false,
        })
    }

    /// Starts an encrypting stage with an IV chosen by `mode`.
    ///
    /// For [`IvMode::RandomPrefixed`] the IV is emitted ahead of the first
    /// ciphertext bytes.
    pub fn encryptor(key: &CipherKey, mode: IvMode) -> Result<Self, CipherError> {
        let iv = mode.resolve()?;
        let mut stage = Self::start(key, &iv, Direction::Encrypt)?;
        stage.prefix_pending = mode.is_prefixed();
        Ok(stage)
    }

    /// Direction this stage runs in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        match self.mode {
            Mode::Encrypt(_) => Direction::Encrypt,
            Mode::Decrypt(_) => Direction::Decrypt,
        }
    }

    /// IV the chaining state was seeded with.
    #[must_use]
    pub const fn iv(&self) -> &[u8; BLOCK_LEN] {
        &self.iv
    }

    /// Bytes currently waiting for a whole block.
    #[must_use]
    pub const fn buffered(&self) -> usize {
        self.carry_len
    }

    /// Transforms every whole block available and appends the result to `out`.
    ///
    /// Returns the number of bytes appended, which may be zero.
    pub fn transform(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<usize, CipherError> {
        if self.finalized {
            return Err(CipherError::Finalized);
        }
        let before = out.len();
        self.emit_prefix(out);

        let total = self.carry_len + input.len();
        let mut whole = total - total % BLOCK_LEN;
        if whole == total && whole > 0 && self.direction() == Direction::Decrypt {
            whole -= BLOCK_LEN;
        }

        if whole == 0 {
            self.carry[self.carry_len..total].copy_from_slice(input);
            self.carry_len = total;
            return Ok(out.len() - before);
        }

        let start = out.len();
        let take = whole - self.carry_len;
        out.reserve(whole);
        out.extend_from_slice(&self.carry[..self.carry_len]);
        out.extend_from_slice(&input[..take]);
        self.process(&mut out[start..]);

        let rest = &input[take..];
        self.carry[..rest.len()].copy_from_slice(rest);
        self.carry_len = rest.len();
        Ok(out.len() - before)
    }

    /// Emits the final block: padding when encrypting, the unpadded tail when
    /// decrypting. The stage is spent afterwards.
    pub fn finalize(&mut self, out: &mut Vec<u8>) -> Result<usize, CipherError> {
        if self.finalized {
            return Err(CipherError::Finalized);
        }
        self.finalized = true;
        let before = out.len();
        self.emit_prefix(out);

        let mut block = [0u8; BLOCK_LEN];
        let result = match self.direction() {
            Direction::Encrypt => {
                let pad = BLOCK_LEN - self.carry_len;
                block[..self.carry_len].copy_from_slice(&self.carry[..self.carry_len]);
                block[self.carry_len..].fill(pad as u8);
                self.process(&mut block);
                out.extend_from_slice(&block);
                Ok(out.len() - before)
            }
            Direction::Decrypt => {
                if self.carry_len != BLOCK_LEN {
                    Err(CipherError::TruncatedCiphertext {
                        trailing: self.carry_len,
                    })
                } else {
                    block.copy_from_slice(&self.carry);
                    self.process(&mut block);
                    match pkcs7_len(&block) {
                        Some(keep) => {
                            out.extend_from_slice(&block[..keep]);
                            Ok(out.len() - before)
                        }
                        None => Err(CipherError::BadPadding),
                    }
                }
            }
        };
        block.zeroize();
        self.carry.zeroize();
        self.carry_len = 0;
        result
    }

    fn emit_prefix(&mut self, out: &mut Vec<u8>) {
        if self.prefix_pending {
            out.extend_from_slice(&self.iv);
            self.prefix_pending = false;
        }
    }

    fn process(&mut self, buf: &mut [u8]) {
        debug_assert_eq!(buf.len() % BLOCK_LEN, 0);
        match &mut self.mode {
            Mode::Encrypt(enc) => {
                for block in buf.chunks_exact_mut(BLOCK_LEN) {
                    enc.encrypt_block_mut(GenericArray::from_mut_slice(block));
                }
            }
            Mode::Decrypt(dec) => {
                for block in buf.chunks_exact_mut(BLOCK_LEN) {
                    dec.decrypt_block_mut(GenericArray::from_mut_slice(block));
                }
            }
        }
    }
}

impl Drop for CipherStage {
    fn drop(&mut self) {
        self.carry.zeroize();
    }
}

/// Length of the data part of a PKCS#7 padded block, or `None` if the padding
/// is malformed.
fn pkcs7_len(block: &[u8; BLOCK_LEN]) -> Option<usize> {
    let pad = usize::from(block[BLOCK_LEN - 1]);
    if pad == 0 || pad > BLOCK_LEN {
        return None;
    }
    let keep = BLOCK_LEN - pad;
    block[keep..]
        .iter()
        .all(|&b| usize::from(b) == pad)
        .then_some(keep)
}
