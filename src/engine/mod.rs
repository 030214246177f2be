//! # Cipher Engines
//!
//! An engine is an incremental block-cipher transformer: it buffers partial
//! blocks between [`update`](CipherEngine::update) calls and applies padding
//! (or rejects misalignment) in [`finalize`](CipherEngine::finalize).
//!
//! The stream adapters only ever talk to the [`CipherEngine`] trait.
//! [`StreamCryptor`] is the stock implementation over AES, DES and 3DES in
//! ECB or CBC mode. [`Cryptor`] wraps any engine to run a whole payload into
//! one `Vec<u8>`.

mod block;
pub mod cryptor;
pub mod stream_cryptor;

pub use cryptor::Cryptor;
pub use stream_cryptor::StreamCryptor;

use crate::consts::{AES_BLOCK_SIZE, DES_BLOCK_SIZE};
use crate::status::EngineStatus;

/// Incremental update/final cipher.
///
/// Before calling [`update`](Self::update) or [`finalize`](Self::finalize) the
/// caller sizes `output` with [`output_len`](Self::output_len); a shorter
/// buffer fails with [`EngineStatus::BufferTooSmall`].
pub trait CipherEngine {
    /// Block size of the underlying algorithm, in bytes.
    fn block_size(&self) -> usize;

    /// Upper bound on what the next call produces for `input_len` more bytes.
    ///
    /// With `is_final` the bound covers an update of `input_len` bytes
    /// followed by [`finalize`](Self::finalize).
    fn output_len(&self, input_len: usize, is_final: bool) -> usize;

    /// Transform `input`, writing whole blocks to `output`. Returns the number
    /// of bytes written, which may be zero while a partial block is buffered.
    fn update(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, EngineStatus>;

    /// Flush the buffered tail: pad when encrypting, strip and verify padding
    /// when decrypting. Returns the number of bytes written.
    fn finalize(&mut self, output: &mut [u8]) -> Result<usize, EngineStatus>;
}

impl<E: CipherEngine + ?Sized> CipherEngine for Box<E> {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn output_len(&self, input_len: usize, is_final: bool) -> usize {
        (**self).output_len(input_len, is_final)
    }

    fn update(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, EngineStatus> {
        (**self).update(input, output)
    }

    fn finalize(&mut self, output: &mut [u8]) -> Result<usize, EngineStatus> {
        (**self).finalize(output)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// AES with a 16, 24 or 32 byte key.
    Aes,
    /// Single DES, 8 byte key.
    Des,
    /// Three-key EDE triple DES, 24 byte key.
    TripleDes,
    /// CAST-128, 5 to 16 byte key.
    Cast,
    /// RC2 with effective key bits equal to the key length.
    Rc2,
    /// Blowfish, 8 to 56 byte key.
    Blowfish,
}

impl Algorithm {
    pub const fn block_size(self) -> usize {
        match self {
            Algorithm::Aes => AES_BLOCK_SIZE,
            Algorithm::Des
            | Algorithm::TripleDes
            | Algorithm::Cast
            | Algorithm::Rc2
            | Algorithm::Blowfish => DES_BLOCK_SIZE,
        }
    }

    pub const fn valid_key_size(self) -> ValidKeySize {
        match self {
            Algorithm::Aes => ValidKeySize::Discrete(&[16, 24, 32]),
            Algorithm::Des => ValidKeySize::Fixed(8),
            Algorithm::TripleDes => ValidKeySize::Fixed(24),
            Algorithm::Cast => ValidKeySize::Range { min: 5, max: 16 },
            Algorithm::Rc2 => ValidKeySize::Range { min: 1, max: 128 },
            Algorithm::Blowfish => ValidKeySize::Range { min: 8, max: 56 },
        }
    }
}

/// Block chaining mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    Ecb,
    #[default]
    Cbc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Padding {
    /// Total input must be a whole number of blocks.
    None,
    #[default]
    Pkcs7,
}

/// Key lengths an algorithm accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidKeySize {
    Fixed(usize),
    Discrete(&'static [usize]),
    Range { min: usize, max: usize },
}

impl ValidKeySize {
    pub fn is_valid(&self, len: usize) -> bool {
        match *self {
            ValidKeySize::Fixed(size) => len == size,
            ValidKeySize::Discrete(sizes) => sizes.contains(&len),
            ValidKeySize::Range { min, max } => (min..=max).contains(&len),
        }
    }

    /// Smallest valid size that can hold a key of `len` bytes, or `None` when
    /// `len` exceeds every valid size.
    pub fn padded_size(&self, len: usize) -> Option<usize> {
        match *self {
            ValidKeySize::Fixed(size) => (len <= size).then_some(size),
            ValidKeySize::Discrete(sizes) => sizes.iter().copied().filter(|&s| s >= len).min(),
            ValidKeySize::Range { min, max } => (len <= max).then_some(len.max(min)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_key_sizes() {
        let aes = Algorithm::Aes.valid_key_size();
        assert_eq!(aes.padded_size(0), Some(16));
        assert_eq!(aes.padded_size(5), Some(16));
        assert_eq!(aes.padded_size(16), Some(16));
        assert_eq!(aes.padded_size(17), Some(24));
        assert_eq!(aes.padded_size(32), Some(32));
        assert_eq!(aes.padded_size(33), None);

        let des = Algorithm::Des.valid_key_size();
        assert_eq!(des.padded_size(3), Some(8));
        assert_eq!(des.padded_size(9), None);

        let cast = Algorithm::Cast.valid_key_size();
        assert_eq!(cast.padded_size(2), Some(5));
        assert_eq!(cast.padded_size(7), Some(7));
        assert_eq!(cast.padded_size(17), None);

        let blowfish = Algorithm::Blowfish.valid_key_size();
        assert_eq!(blowfish.padded_size(0), Some(8));
        assert_eq!(blowfish.padded_size(56), Some(56));
        assert_eq!(blowfish.padded_size(57), None);
    }

    #[test]
    fn key_size_validity() {
        assert!(Algorithm::Aes.valid_key_size().is_valid(24));
        assert!(!Algorithm::Aes.valid_key_size().is_valid(20));
        assert!(Algorithm::TripleDes.valid_key_size().is_valid(24));
        assert!(!Algorithm::Des.valid_key_size().is_valid(16));
        assert!(Algorithm::Rc2.valid_key_size().is_valid(1));
        assert!(Algorithm::Rc2.valid_key_size().is_valid(128));
        assert!(!Algorithm::Rc2.valid_key_size().is_valid(0));
        assert!(!Algorithm::Cast.valid_key_size().is_valid(4));
    }
}
