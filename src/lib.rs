// src/lib.rs

//! Streaming block-cipher adapters.
//!
//! [`CipherReader`] and [`CipherWriter`] put an update/final [`CipherEngine`]
//! behind ordinary byte streams, so a file or socket can be encrypted or
//! decrypted incrementally. [`EncryptedFile`] builds a minimal file format on
//! top: a random IV followed by AES-CBC/PKCS#7 ciphertext.
//!
//! ```no_run
//! use cipherstream_rs::EncryptedFile;
//!
//! let file = EncryptedFile::with_password("notes.enc", "correct horse")?;
//! let mut writer = file.open_output_stream()?;
//! writer.write_utf8("The quick brown fox jumps over the lazy dog.")?;
//! writer.close()?;
//!
//! let text = file.open_input_stream()?.read_all_text()?;
//! assert_eq!(text, "The quick brown fox jumps over the lazy dog.");
//! # Ok::<(), cipherstream_rs::CipherStreamError>(())
//! ```

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod builders;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encrypted_file;
pub mod encryptor;
pub mod engine;
pub mod error;
pub mod header;
pub mod status;
pub mod stream;
pub mod utils;

// Stream adapters and the file envelope
pub use decryptor::{decrypt_stream, open_decrypting_reader, CipherReader};
pub use encrypted_file::{EncryptedFile, EncryptedFileReader, EncryptedFileWriter};
pub use encryptor::{encrypt_stream, open_encrypting_writer, CipherWriter};
pub use error::CipherStreamError;
pub use status::{CipherStreamStatus, EngineStatus, StreamState};
pub use stream::{ByteSink, ByteSource};

// Engines
pub use engine::{
    Algorithm, CipherEngine, Cryptor, Mode, Operation, Padding, StreamCryptor, ValidKeySize,
};

// Primitives
pub use builders::KeyDerivationBuilder;
pub use crypto::digest::{Digest, DigestAlgorithm};
pub use crypto::hmac::{Hmac, HmacAlgorithm};
pub use crypto::kdf::pbkdf2::{calibrate, derive_key};
pub use crypto::kdf::{KeyDerivation, PseudoRandomAlgorithm};
pub use crypto::rng::{generate_bytes, SecureRandomExt};
pub use crypto::updateable::Updateable;

#[cfg(feature = "batch-ops")]
pub use batch_ops::{decrypt_batch, encrypt_batch};
