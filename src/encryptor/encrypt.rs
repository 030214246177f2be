//! src/encryptor/encrypt.rs
//! IV-prefixed encryption onto any sink.

use crate::aliases::Iv16;
use crate::consts::{DEFAULT_BLOCK_UNIT, FILE_ALGORITHM, FILE_MODE, FILE_PADDING};
use crate::crypto::rng::SecureRandomExt;
use crate::encryptor::writer::CipherWriter;
use crate::engine::{Operation, StreamCryptor};
use crate::error::CipherStreamError;
use crate::header::write_iv_header;
use crate::stream::ByteSink;

use std::io::{ErrorKind, Read};
use tracing::debug;

/// Write a fresh random IV to `sink` and return a writer that encrypts
/// everything after it with AES-CBC/PKCS#7 under `key`.
pub fn open_encrypting_writer<W: ByteSink>(
    mut sink: W,
    key: &[u8],
    capacity: usize,
) -> Result<CipherWriter<W>, CipherStreamError> {
    let iv = Iv16::try_random()?;
    let engine = StreamCryptor::new(
        Operation::Encrypt,
        FILE_ALGORITHM,
        FILE_MODE,
        FILE_PADDING,
        key,
        iv.expose_secret(),
    )?;
    write_iv_header(&mut sink, &iv)?;
    Ok(CipherWriter::with_capacity(engine, sink, capacity))
}

/// Encrypt all of `input` into `output` as `[IV][ciphertext]`.
///
/// Returns the number of plaintext bytes consumed.
pub fn encrypt_stream<R, W>(mut input: R, output: W, key: &[u8]) -> Result<u64, CipherStreamError>
where
    R: Read,
    W: ByteSink,
{
    let mut writer = open_encrypting_writer(output, key, DEFAULT_BLOCK_UNIT)?;
    let mut chunk = vec![0u8; DEFAULT_BLOCK_UNIT];
    let mut total = 0u64;

    loop {
        let n = match input.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => {
                writer.abort();
                return Err(err.into());
            }
        };
        writer.write(&chunk[..n])?;
        total += n as u64;
    }

    writer.close()?;
    debug!(plaintext = total, "stream encrypted");
    Ok(total)
}
