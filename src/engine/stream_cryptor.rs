//! src/engine/stream_cryptor.rs
//!
//! Incremental ECB/CBC block cipher with optional PKCS#7 padding.

use super::block::{new_primitive, BlockPrimitive};
use super::{Algorithm, CipherEngine, Mode, Operation, Padding};
use crate::aliases::SecretKey;
use crate::consts::MAX_BLOCK_SIZE;
use crate::status::EngineStatus;
use crate::utils::{pkcs7_pad_len, xor_in_place};

use std::fmt;
use tracing::{debug, trace};

/// Update/final cipher over one of the supported [`Algorithm`]s.
///
/// Keys shorter than a valid size are zero-padded up to the next one; keys
/// longer than every valid size fail with [`EngineStatus::KeySizeError`].
/// In CBC mode the IV must be exactly one block, or empty for an all-zero IV.
///
/// The first failure is sticky: every later call returns the same status.
pub struct StreamCryptor {
    operation: Operation,
    algorithm: Algorithm,
    mode: Mode,
    padding: Padding,
    cipher: Box<dyn BlockPrimitive>,
    block_size: usize,
    /// Previous ciphertext block (CBC only).
    chain: Vec<u8>,
    /// Input not yet transformed: less than one block, or exactly one block
    /// held back for padding removal.
    partial: Vec<u8>,
    status: Option<EngineStatus>,
}

impl StreamCryptor {
    pub fn new(
        operation: Operation,
        algorithm: Algorithm,
        mode: Mode,
        padding: Padding,
        key: &[u8],
        iv: &[u8],
    ) -> Result<Self, EngineStatus> {
        let block_size = algorithm.block_size();

        let key_len = algorithm
            .valid_key_size()
            .padded_size(key.len())
            .ok_or(EngineStatus::KeySizeError)?;
        let mut padded_key = SecretKey::new(vec![0u8; key_len]);
        padded_key.expose_secret_mut()[..key.len()].copy_from_slice(key);
        let cipher = new_primitive(algorithm, padded_key.expose_secret())?;

        let chain = match mode {
            Mode::Cbc if iv.is_empty() => vec![0u8; block_size],
            Mode::Cbc if iv.len() == block_size => iv.to_vec(),
            Mode::Cbc => return Err(EngineStatus::ParamError),
            Mode::Ecb => Vec::new(),
        };

        debug!(?operation, ?algorithm, ?mode, ?padding, key_len, "stream cryptor created");
        Ok(Self {
            operation,
            algorithm,
            mode,
            padding,
            cipher,
            block_size,
            chain,
            partial: Vec::with_capacity(block_size),
            status: None,
        })
    }

    /// Encrypting cryptor with the default mode (CBC) and padding (PKCS#7).
    pub fn encryptor(algorithm: Algorithm, key: &[u8], iv: &[u8]) -> Result<Self, EngineStatus> {
        Self::new(Operation::Encrypt, algorithm, Mode::default(), Padding::default(), key, iv)
    }

    /// Decrypting counterpart of [`encryptor`](Self::encryptor).
    pub fn decryptor(algorithm: Algorithm, key: &[u8], iv: &[u8]) -> Result<Self, EngineStatus> {
        Self::new(Operation::Decrypt, algorithm, Mode::default(), Padding::default(), key, iv)
    }

    pub const fn operation(&self) -> Operation {
        self.operation
    }

    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// First failure this cryptor recorded, if any.
    pub const fn status(&self) -> Option<EngineStatus> {
        self.status
    }

    /// Decrypting with padding keeps the last whole block until `finalize`,
    /// since only then is it known to carry the padding.
    fn holds_back_final_block(&self) -> bool {
        self.operation == Operation::Decrypt && self.padding == Padding::Pkcs7
    }

    fn whole_blocks(&self, total: usize) -> usize {
        let mut blocks = total / self.block_size;
        if self.holds_back_final_block() && blocks > 0 && total % self.block_size == 0 {
            blocks -= 1;
        }
        blocks
    }

    fn check(&self) -> Result<(), EngineStatus> {
        match self.status {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }

    fn fail(&mut self, status: EngineStatus) -> EngineStatus {
        debug!(%status, operation = ?self.operation, "stream cryptor failed");
        *self.status.get_or_insert(status)
    }

    fn transform(&mut self, block: &mut [u8]) {
        match (self.mode, self.operation) {
            (Mode::Ecb, Operation::Encrypt) => self.cipher.encrypt_in_place(block),
            (Mode::Ecb, Operation::Decrypt) => self.cipher.decrypt_in_place(block),
            (Mode::Cbc, Operation::Encrypt) => {
                xor_in_place(block, &self.chain);
                self.cipher.encrypt_in_place(block);
                self.chain.copy_from_slice(block);
            }
            (Mode::Cbc, Operation::Decrypt) => {
                let mut ciphertext = [0u8; MAX_BLOCK_SIZE];
                ciphertext[..self.block_size].copy_from_slice(block);
                self.cipher.decrypt_in_place(block);
                xor_in_place(block, &self.chain);
                self.chain.copy_from_slice(&ciphertext[..self.block_size]);
            }
        }
    }
}

impl CipherEngine for StreamCryptor {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn output_len(&self, input_len: usize, is_final: bool) -> usize {
        let total = self.partial.len() + input_len;
        if !is_final {
            return self.whole_blocks(total) * self.block_size;
        }
        match (self.operation, self.padding) {
            (Operation::Encrypt, Padding::Pkcs7) => (total / self.block_size + 1) * self.block_size,
            _ => total,
        }
    }

    fn update(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, EngineStatus> {
        self.check()?;
        if output.len() < self.output_len(input.len(), false) {
            return Err(self.fail(EngineStatus::BufferTooSmall));
        }

        let block = self.block_size;
        let hold_back = self.holds_back_final_block();
        let mut pending = input;
        let mut written = 0;

        // Complete the buffered block first.
        if !self.partial.is_empty() {
            let take = (block - self.partial.len()).min(pending.len());
            self.partial.extend_from_slice(&pending[..take]);
            pending = &pending[take..];

            if self.partial.len() == block && (!hold_back || !pending.is_empty()) {
                output[..block].copy_from_slice(&self.partial);
                self.partial.clear();
                self.transform(&mut output[..block]);
                written = block;
            }
        }

        // Either the buffer is now empty or `pending` is.
        let direct = self.whole_blocks(pending.len()) * block;
        for chunk in pending[..direct].chunks_exact(block) {
            let out = &mut output[written..written + block];
            out.copy_from_slice(chunk);
            self.transform(out);
            written += block;
        }
        self.partial.extend_from_slice(&pending[direct..]);

        trace!(input = input.len(), written, buffered = self.partial.len(), "cryptor update");
        Ok(written)
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<usize, EngineStatus> {
        self.check()?;
        let block = self.block_size;

        let written = match (self.operation, self.padding) {
            (_, Padding::None) => {
                if !self.partial.is_empty() {
                    return Err(self.fail(EngineStatus::AlignmentError));
                }
                0
            }
            (Operation::Encrypt, Padding::Pkcs7) => {
                if output.len() < block {
                    return Err(self.fail(EngineStatus::BufferTooSmall));
                }
                let pad = block - self.partial.len();
                let out = &mut output[..block];
                out[..self.partial.len()].copy_from_slice(&self.partial);
                out[self.partial.len()..].fill(pad as u8);
                self.transform(out);
                block
            }
            (Operation::Decrypt, Padding::Pkcs7) => {
                if self.partial.len() != block {
                    return Err(self.fail(EngineStatus::AlignmentError));
                }
                let mut last = [0u8; MAX_BLOCK_SIZE];
                let last = &mut last[..block];
                last.copy_from_slice(&self.partial);
                self.transform(last);

                let Some(pad) = pkcs7_pad_len(last) else {
                    return Err(self.fail(EngineStatus::DecodeError));
                };
                let plain = block - pad;
                if output.len() < plain {
                    return Err(self.fail(EngineStatus::BufferTooSmall));
                }
                output[..plain].copy_from_slice(&last[..plain]);
                plain
            }
        };

        self.partial.clear();
        trace!(written, "cryptor finalized");
        Ok(written)
    }
}

impl fmt::Debug for StreamCryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamCryptor")
            .field("operation", &self.operation)
            .field("algorithm", &self.algorithm)
            .field("mode", &self.mode)
            .field("padding", &self.padding)
            .field("buffered", &self.partial.len())
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
