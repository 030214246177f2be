//! src/engine/cryptor.rs
//!
//! Whole-payload wrapper around a [`CipherEngine`].

use super::{Algorithm, CipherEngine, Mode, Operation, Padding, StreamCryptor};
use crate::crypto::updateable::Updateable;
use crate::status::EngineStatus;

/// Accumulates every update of an engine into one buffer.
///
/// ```
/// use cipherstream_rs::{Algorithm, Cryptor, StreamCryptor};
///
/// let engine = StreamCryptor::encryptor(Algorithm::Aes, b"0123456789abcdef", &[])?;
/// let mut cryptor = Cryptor::new(engine);
/// cryptor.update(b"attack ")?.update(b"at dawn")?;
/// let ciphertext = cryptor.finalize()?;
/// assert_eq!(ciphertext.len(), 16);
/// # Ok::<(), cipherstream_rs::EngineStatus>(())
/// ```
#[derive(Debug)]
pub struct Cryptor<E: CipherEngine = StreamCryptor> {
    engine: E,
    accumulated: Vec<u8>,
    status: Option<EngineStatus>,
}

impl<E: CipherEngine> Cryptor<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            accumulated: Vec::new(),
            status: None,
        }
    }

    /// Feed `data` through the engine. The first failure is sticky.
    pub fn update(&mut self, data: &[u8]) -> Result<&mut Self, EngineStatus> {
        if let Some(status) = self.status {
            return Err(status);
        }
        let start = self.accumulated.len();
        self.accumulated
            .resize(start + self.engine.output_len(data.len(), false), 0);

        match self.engine.update(data, &mut self.accumulated[start..]) {
            Ok(written) => {
                self.accumulated.truncate(start + written);
                Ok(self)
            }
            Err(status) => {
                self.accumulated.truncate(start);
                self.status = Some(status);
                Err(status)
            }
        }
    }

    /// Finalize the engine and hand back everything it produced.
    pub fn finalize(mut self) -> Result<Vec<u8>, EngineStatus> {
        if let Some(status) = self.status {
            return Err(status);
        }
        let start = self.accumulated.len();
        self.accumulated
            .resize(start + self.engine.output_len(0, true), 0);

        let written = self.engine.finalize(&mut self.accumulated[start..])?;
        self.accumulated.truncate(start + written);
        Ok(self.accumulated)
    }

    /// First failure recorded by [`update`](Self::update), if any.
    pub const fn status(&self) -> Option<EngineStatus> {
        self.status
    }
}

impl<E: CipherEngine> Updateable for Cryptor<E> {
    fn update_bytes(&mut self, data: &[u8]) -> Result<&mut Self, EngineStatus> {
        self.update(data)
    }
}

/// One-shot encryption of `plaintext`.
pub fn encrypt(
    algorithm: Algorithm,
    mode: Mode,
    padding: Padding,
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, EngineStatus> {
    let engine = StreamCryptor::new(Operation::Encrypt, algorithm, mode, padding, key, iv)?;
    let mut cryptor = Cryptor::new(engine);
    cryptor.update(plaintext)?;
    cryptor.finalize()
}

/// One-shot decryption of `ciphertext`.
pub fn decrypt(
    algorithm: Algorithm,
    mode: Mode,
    padding: Padding,
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, EngineStatus> {
    let engine = StreamCryptor::new(Operation::Decrypt, algorithm, mode, padding, key, iv)?;
    let mut cryptor = Cryptor::new(engine);
    cryptor.update(ciphertext)?;
    cryptor.finalize()
}
