//! # Key Derivation Functions (KDF)
//!
//! Password-based key derivation (PBKDF2 over a selectable HMAC pseudo-random
//! function) and the parameter set an [`EncryptedFile`](crate::EncryptedFile)
//! derives its key with.
//!
//! ## Modules
//!
//! - [`pbkdf2`] - PBKDF2 derivation and round-count calibration

pub mod pbkdf2;

use crate::aliases::SecretKey;
use crate::builders::KeyDerivationBuilder;
use crate::consts::{DEFAULT_KDF_KEY_LENGTH, DEFAULT_KDF_PRF, DEFAULT_KDF_ROUNDS, DEFAULT_KDF_SALT};
use crate::error::CipherStreamError;

/// HMAC variant PBKDF2 runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoRandomAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

/// Complete PBKDF2 parameter set: everything except the password.
///
/// The encrypted file format does not record these, so whatever produced a
/// file must be handed to whatever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDerivation {
    pub(crate) salt: Vec<u8>,
    pub(crate) prf: PseudoRandomAlgorithm,
    pub(crate) rounds: u32,
    pub(crate) key_len: usize,
}

impl KeyDerivation {
    /// Start from the file-format defaults and override what differs.
    #[must_use]
    pub fn builder() -> KeyDerivationBuilder {
        KeyDerivationBuilder::new()
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub const fn prf(&self) -> PseudoRandomAlgorithm {
        self.prf
    }

    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    pub const fn key_len(&self) -> usize {
        self.key_len
    }

    /// Derive a key from `password` with these parameters.
    pub fn derive(&self, password: &str) -> Result<SecretKey, CipherStreamError> {
        pbkdf2::derive_key(
            password.as_bytes(),
            &self.salt,
            self.prf,
            self.rounds,
            self.key_len,
        )
    }
}

impl Default for KeyDerivation {
    fn default() -> Self {
        Self {
            salt: DEFAULT_KDF_SALT.as_bytes().to_vec(),
            prf: DEFAULT_KDF_PRF,
            rounds: DEFAULT_KDF_ROUNDS,
            key_len: DEFAULT_KDF_KEY_LENGTH,
        }
    }
}
