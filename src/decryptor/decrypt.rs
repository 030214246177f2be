//! src/decryptor/decrypt.rs
//! Decryption of IV-prefixed ciphertext from any source.

use crate::consts::{DEFAULT_BLOCK_UNIT, FILE_ALGORITHM, FILE_MODE, FILE_PADDING};
use crate::decryptor::reader::CipherReader;
use crate::engine::{Operation, StreamCryptor};
use crate::error::CipherStreamError;
use crate::header::read_iv_header;
use crate::stream::ByteSource;

use std::io::Write;
use tracing::debug;

/// Read the IV header from `source` and return a reader that decrypts the
/// rest with AES-CBC/PKCS#7 under `key`.
pub fn open_decrypting_reader<R: ByteSource>(
    mut source: R,
    key: &[u8],
    capacity: usize,
) -> Result<CipherReader<R>, CipherStreamError> {
    let iv = read_iv_header(&mut source)?;
    let engine = StreamCryptor::new(
        Operation::Decrypt,
        FILE_ALGORITHM,
        FILE_MODE,
        FILE_PADDING,
        key,
        iv.expose_secret(),
    )?;
    Ok(CipherReader::with_capacity(engine, source, capacity))
}

/// Decrypt `[IV][ciphertext]` from `input` into `output`.
///
/// Returns the number of plaintext bytes written. A wrong key almost always
/// surfaces as a padding [`DecodeError`](crate::EngineStatus::DecodeError).
pub fn decrypt_stream<R, W>(input: R, mut output: W, key: &[u8]) -> Result<u64, CipherStreamError>
where
    R: ByteSource,
    W: Write,
{
    let mut reader = open_decrypting_reader(input, key, DEFAULT_BLOCK_UNIT)?;
    let mut chunk = vec![0u8; DEFAULT_BLOCK_UNIT];
    let mut total = 0u64;

    while !reader.is_finished() {
        let n = reader.read(&mut chunk)?;
        output.write_all(&chunk[..n])?;
        total += n as u64;
    }
    output.flush()?;

    debug!(plaintext = total, "stream decrypted");
    Ok(total)
}
