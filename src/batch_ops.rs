//! src/batch_ops.rs
//! Parallel encryption/decryption of independent stream pairs (feature `batch-ops`).
//!
//! Every pair gets its own adapter, IV and engine; nothing is shared between
//! pairs except the key.

use rayon::prelude::*;
use std::io::{Read, Write};

use crate::aliases::SecretKey;
use crate::{decrypt_stream, encrypt_stream, CipherStreamError};

/// Encrypt each `(plaintext, sink)` pair as `[IV][ciphertext]`.
pub fn encrypt_batch<R, W>(batch: &mut [(R, W)], key: &SecretKey) -> Result<(), CipherStreamError>
where
    R: Read + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| encrypt_stream(src, dst, key.expose_secret()).map(drop))
}

/// Decrypt each `([IV][ciphertext], sink)` pair.
pub fn decrypt_batch<R, W>(batch: &mut [(R, W)], key: &SecretKey) -> Result<(), CipherStreamError>
where
    R: Read + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| decrypt_stream(src, dst, key.expose_secret()).map(drop))
}
