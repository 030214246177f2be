//! src/builders/key_derivation_builder.rs
//! PBKDF2 parameter builder

use crate::aliases::SecretKey;
use crate::crypto::kdf::{KeyDerivation, PseudoRandomAlgorithm};
use crate::error::CipherStreamError;

/// Builder for a [`KeyDerivation`].
///
/// Starts from the encrypted file defaults (fixed salt, HMAC-SHA256, 8 rounds,
/// 16-byte key). Files written with non-default parameters can only be read
/// back with the same parameters.
///
/// # Thread Safety
///
/// This type is **thread-safe** (`Send + Sync`). All operations are pure.
#[derive(Debug, Clone)]
pub struct KeyDerivationBuilder {
    params: KeyDerivation,
}

impl KeyDerivationBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: KeyDerivation::default(),
        }
    }

    /// Set custom round count (minimum 1)
    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.params.rounds = rounds.max(1);
        self
    }

    #[must_use]
    pub fn with_salt(mut self, salt: impl AsRef<[u8]>) -> Self {
        self.params.salt = salt.as_ref().to_vec();
        self
    }

    #[must_use]
    pub fn with_prf(mut self, prf: PseudoRandomAlgorithm) -> Self {
        self.params.prf = prf;
        self
    }

    /// Derived key length in bytes (16, 24 or 32 for AES).
    #[must_use]
    pub fn with_key_len(mut self, key_len: usize) -> Self {
        self.params.key_len = key_len;
        self
    }

    /// Current round count
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.params.rounds
    }

    #[must_use]
    pub fn build(self) -> KeyDerivation {
        self.params
    }

    /// Convenience: derive a key without keeping the parameter set around
    pub fn derive(self, password: &str) -> Result<SecretKey, CipherStreamError> {
        self.params.derive(password)
    }
}

impl Default for KeyDerivationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
