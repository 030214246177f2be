//! # Constants
//!
//! Buffer sizing for the stream adapters and the fixed parameters of the
//! encrypted file format.

use crate::crypto::kdf::PseudoRandomAlgorithm;
use crate::engine::{Algorithm, Mode, Padding};

/// Allocation unit for adapter buffers, and their initial capacity.
pub const DEFAULT_BLOCK_UNIT: usize = 1024;

/// Upper bound adapter buffers grow to on their own.
///
/// A request larger than this is served in several engine calls instead of
/// growing the buffer further.
pub const MAX_BUFFER_CAPACITY: usize = DEFAULT_BLOCK_UNIT * 16;

/// Largest block size of any supported algorithm.
pub const MAX_BLOCK_SIZE: usize = 16;

pub const AES_BLOCK_SIZE: usize = 16;
/// DES, 3DES, CAST, RC2 and Blowfish all use 64-bit blocks.
pub const DES_BLOCK_SIZE: usize = 8;

/// Salt used when an [`EncryptedFile`](crate::EncryptedFile) is opened from a
/// password without an explicit salt.
///
/// The file format stores no salt, so a reader must use the same value the
/// writer used.
pub const DEFAULT_KDF_SALT: &str = "nevergonnagiveyouup";

/// PBKDF2 rounds used by the encrypted file format.
///
/// Low on purpose: the format stores no KDF parameters, so this value is part
/// of the format. Use [`KeyDerivationBuilder`](crate::KeyDerivationBuilder) for
/// stronger settings.
pub const DEFAULT_KDF_ROUNDS: u32 = 8;

/// Derived key length in bytes (AES-128).
pub const DEFAULT_KDF_KEY_LENGTH: usize = 16;

pub const DEFAULT_KDF_PRF: PseudoRandomAlgorithm = PseudoRandomAlgorithm::Sha256;

/// Cipher of the encrypted file format: AES in CBC mode with PKCS#7 padding.
pub const FILE_ALGORITHM: Algorithm = Algorithm::Aes;
pub const FILE_MODE: Mode = Mode::Cbc;
pub const FILE_PADDING: Padding = Padding::Pkcs7;
