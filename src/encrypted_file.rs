//! src/encrypted_file.rs
//! File-backed encrypted envelope.
//!
//! On-disk layout:
//!
//! ```text
//! [ IV: 16 bytes ][ AES-CBC ciphertext with PKCS#7 padding ]
//! ```
//!
//! The file records nothing else. In particular the KDF salt, PRF and round
//! count are not stored, so a file written from a password can only be opened
//! with the same [`KeyDerivation`] parameters.

use crate::aliases::SecretKey;
use crate::consts::{DEFAULT_BLOCK_UNIT, FILE_ALGORITHM};
use crate::crypto::kdf::KeyDerivation;
use crate::decryptor::{open_decrypting_reader, CipherReader};
use crate::encryptor::{open_encrypting_writer, CipherWriter};
use crate::error::CipherStreamError;
use crate::status::EngineStatus;

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Write adapter over a freshly created encrypted file.
pub type EncryptedFileWriter = CipherWriter<BufWriter<File>>;

/// Read adapter over an existing encrypted file.
pub type EncryptedFileReader = CipherReader<BufReader<File>>;

/// A path plus the AES key its contents are encrypted under.
///
/// Each [`open_output_stream`](Self::open_output_stream) truncates the file
/// and writes a fresh random IV, so encrypting the same plaintext twice gives
/// different files.
pub struct EncryptedFile {
    path: PathBuf,
    key: SecretKey,
}

impl EncryptedFile {
    /// Use `key` as-is. Keys shorter than 16, 24 or 32 bytes are zero-padded
    /// to the next of those sizes; longer keys are rejected.
    pub fn with_key(path: impl Into<PathBuf>, key: &[u8]) -> Result<Self, CipherStreamError> {
        if FILE_ALGORITHM.valid_key_size().padded_size(key.len()).is_none() {
            return Err(EngineStatus::KeySizeError.into());
        }
        Ok(Self {
            path: path.into(),
            key: SecretKey::new(key.to_vec()),
        })
    }

    /// Derive the key from `password` with the default parameters.
    pub fn with_password(
        path: impl Into<PathBuf>,
        password: &str,
    ) -> Result<Self, CipherStreamError> {
        Self::with_key_derivation(path, password, &KeyDerivation::default())
    }

    /// Derive the key from `password` with the default parameters and `salt`.
    pub fn with_password_and_salt(
        path: impl Into<PathBuf>,
        password: &str,
        salt: &str,
    ) -> Result<Self, CipherStreamError> {
        let kdf = KeyDerivation::builder().with_salt(salt).build();
        Self::with_key_derivation(path, password, &kdf)
    }

    pub fn with_key_derivation(
        path: impl Into<PathBuf>,
        password: &str,
        kdf: &KeyDerivation,
    ) -> Result<Self, CipherStreamError> {
        let key = kdf.derive(password)?;
        Self::with_key(path, key.expose_secret())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create (or truncate) the file, write a fresh IV and return the
    /// encrypting writer. [`close`](CipherWriter::close) it to write the
    /// final block.
    pub fn open_output_stream(&self) -> Result<EncryptedFileWriter, CipherStreamError> {
        self.open_output_stream_with_capacity(DEFAULT_BLOCK_UNIT)
    }

    pub fn open_output_stream_with_capacity(
        &self,
        capacity: usize,
    ) -> Result<EncryptedFileWriter, CipherStreamError> {
        let file = File::create(&self.path).map_err(CipherStreamError::CreateStream)?;
        let writer =
            open_encrypting_writer(BufWriter::new(file), self.key.expose_secret(), capacity)?;
        debug!(path = %self.path.display(), "encrypted file opened for writing");
        Ok(writer)
    }

    /// Open the file, read its IV and return the decrypting reader.
    pub fn open_input_stream(&self) -> Result<EncryptedFileReader, CipherStreamError> {
        self.open_input_stream_with_capacity(DEFAULT_BLOCK_UNIT)
    }

    pub fn open_input_stream_with_capacity(
        &self,
        capacity: usize,
    ) -> Result<EncryptedFileReader, CipherStreamError> {
        let file = File::open(&self.path).map_err(CipherStreamError::CreateStream)?;
        let reader =
            open_decrypting_reader(BufReader::new(file), self.key.expose_secret(), capacity)?;
        debug!(path = %self.path.display(), "encrypted file opened for reading");
        Ok(reader)
    }

    /// Replace the file contents with the encryption of `plaintext`.
    pub fn write_all(&self, plaintext: &[u8]) -> Result<(), CipherStreamError> {
        let mut writer = self.open_output_stream()?;
        if let Err(status) = writer.write(plaintext) {
            writer.abort();
            return Err(status.into());
        }
        writer.close()?;
        info!(path = %self.path.display(), bytes = plaintext.len(), "encrypted file written");
        Ok(())
    }

    /// Decrypt the whole file.
    pub fn read_all(&self) -> Result<Vec<u8>, CipherStreamError> {
        let mut reader = self.open_input_stream()?;
        let plaintext = reader.read_to_end_plaintext()?;
        info!(path = %self.path.display(), bytes = plaintext.len(), "encrypted file read");
        Ok(plaintext)
    }

    /// Decrypt the whole file as UTF-8 text.
    pub fn read_all_text(&self) -> Result<String, CipherStreamError> {
        Ok(String::from_utf8(self.read_all()?)?)
    }
}

impl fmt::Debug for EncryptedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedFile")
            .field("path", &self.path)
            .field("key", &"[REDACTED]")
            .finish()
    }
}
