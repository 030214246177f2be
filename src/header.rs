//! src/header.rs
//! IV header of the encrypted format: one cipher block, in the clear, ahead
//! of the ciphertext.

use crate::aliases::Iv16;
use crate::error::CipherStreamError;
use crate::stream::{ByteSink, ByteSource};
use tracing::warn;

/// Write `iv` to `sink`. Fewer accepted bytes than one block is a
/// [`CipherStreamError::HeaderWrite`].
#[inline]
pub fn write_iv_header<W>(sink: &mut W, iv: &Iv16) -> Result<(), CipherStreamError>
where
    W: ByteSink + ?Sized,
{
    let expected = iv.expose_secret().len();
    let written = sink.write_bytes(iv.expose_secret())?;
    if written != expected {
        warn!(expected, written, "short IV header write");
        return Err(CipherStreamError::HeaderWrite { expected, written });
    }
    Ok(())
}

/// Read one block of IV from `source`. A source that ends first is a
/// [`CipherStreamError::HeaderRead`].
#[inline]
pub fn read_iv_header<R>(source: &mut R) -> Result<Iv16, CipherStreamError>
where
    R: ByteSource + ?Sized,
{
    let mut iv = Iv16::new([0u8; 16]);
    let expected = iv.expose_secret().len();
    let mut read = 0;
    while read < expected {
        match source.read_bytes(&mut iv.expose_secret_mut()[read..])? {
            0 => {
                warn!(expected, read, "source ended inside the IV header");
                return Err(CipherStreamError::HeaderRead { expected, read });
            }
            n => read += n,
        }
    }
    Ok(iv)
}
