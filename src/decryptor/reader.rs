//! src/decryptor/reader.rs
//! Read adapter: ciphertext in from a [`ByteSource`], plaintext out to the caller.

use crate::consts::DEFAULT_BLOCK_UNIT;
use crate::engine::{CipherEngine, StreamCryptor};
use crate::error::CipherStreamError;
use crate::status::{CipherStreamStatus, StreamState};
use crate::stream::buffer::{CipherBuffer, PendingBuffer};
use crate::stream::ByteSource;

use std::io::{self, ErrorKind, Read};
use tracing::{debug, trace, warn};

/// Decrypting (or, with an encrypting engine, encrypting) reader.
///
/// Each [`read`](Self::read) pulls at most as many ciphertext bytes as the
/// caller asked for, runs them through the engine and returns what the engine
/// produced. Plaintext that does not fit the caller's buffer is kept and
/// returned first on the next call.
///
/// When the source reports end of data the engine is finalized, the tail is
/// returned and the source is released. After that `read` returns `Ok(0)`.
///
/// Any failure is sticky: every later call returns the same status.
pub struct CipherReader<S: ByteSource, E: CipherEngine = StreamCryptor> {
    engine: E,
    source: Option<S>,
    ciphertext: CipherBuffer,
    plaintext: PendingBuffer,
    state: StreamState,
}

impl<S: ByteSource, E: CipherEngine> CipherReader<S, E> {
    /// Wrap `source` with the default initial buffer capacity.
    pub fn new(engine: E, source: S) -> Self {
        Self::with_capacity(engine, source, DEFAULT_BLOCK_UNIT)
    }

    pub fn with_capacity(engine: E, source: S, capacity: usize) -> Self {
        debug!(capacity, block_size = engine.block_size(), "cipher reader opened");
        Self {
            engine,
            source: Some(source),
            ciphertext: CipherBuffer::with_capacity(capacity),
            plaintext: PendingBuffer::default(),
            state: StreamState::Open,
        }
    }

    /// Read up to `out.len()` transformed bytes into `out`.
    ///
    /// `Ok(0)` with a non-empty `out` means either the engine is still
    /// buffering a partial block (call again) or the stream is finished (see
    /// [`is_finished`](Self::is_finished)).
    pub fn read(&mut self, out: &mut [u8]) -> Result<usize, CipherStreamStatus> {
        if let StreamState::Failed(status) = self.state {
            return Err(status);
        }
        if out.is_empty() {
            return Ok(0);
        }
        if !self.plaintext.is_empty() {
            return Ok(self.plaintext.drain_into(out));
        }

        let available = match self.source.as_ref() {
            Some(source) => source.has_bytes_available(),
            None => return Ok(0),
        };
        if !available {
            return self.finish(out);
        }

        self.ciphertext.reserve_for(out.len());
        let want = out.len().min(self.ciphertext.capacity());
        let Some(source) = self.source.as_mut() else {
            return Ok(0);
        };

        let read = match source.read_bytes(&mut self.ciphertext.as_mut_slice()[..want]) {
            Ok(0) => return self.finish(out),
            Ok(n) => n,
            Err(err) => {
                warn!(%err, "cipher reader source failed");
                return Err(self.fail(CipherStreamStatus::OuterTransferError));
            }
        };

        let needed = self.engine.output_len(read, false);
        let updated = self.engine.update(
            &self.ciphertext.as_slice()[..read],
            self.plaintext.prepare(needed),
        );
        match updated {
            Ok(produced) => {
                self.plaintext.commit(produced);
                trace!(read, produced, "cipher reader update");
                Ok(self.plaintext.drain_into(out))
            }
            Err(status) => {
                self.plaintext.clear();
                Err(self.fail(status.into()))
            }
        }
    }

    /// Finalize the engine, release the source and hand out the tail.
    fn finish(&mut self, out: &mut [u8]) -> Result<usize, CipherStreamStatus> {
        let needed = self.engine.output_len(0, true);
        let finalized = self.engine.finalize(self.plaintext.prepare(needed));
        self.release_source();

        match finalized {
            Ok(produced) => {
                self.plaintext.commit(produced);
                self.state.close();
                debug!(tail = produced, "cipher reader reached end of stream");
                Ok(self.plaintext.drain_into(out))
            }
            Err(status) => {
                self.plaintext.clear();
                Err(self.fail(status.into()))
            }
        }
    }

    fn fail(&mut self, status: CipherStreamStatus) -> CipherStreamStatus {
        let status = self.state.fail(status);
        warn!(%status, "cipher reader failed");
        self.release_source();
        status
    }

    fn release_source(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.close();
            trace!("cipher reader released its source");
        }
    }

    /// Read everything that is left.
    pub fn read_to_end_plaintext(&mut self) -> Result<Vec<u8>, CipherStreamStatus> {
        let mut plaintext = Vec::new();
        let mut chunk = vec![0u8; DEFAULT_BLOCK_UNIT];
        while !self.is_finished() {
            let n = self.read(&mut chunk)?;
            plaintext.extend_from_slice(&chunk[..n]);
        }
        self.state.status().into_result()?;
        Ok(plaintext)
    }

    /// Read everything that is left as UTF-8 text.
    pub fn read_all_text(&mut self) -> Result<String, CipherStreamError> {
        let bytes = self.read_to_end_plaintext()?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Release the source and discard buffered plaintext. Idempotent.
    pub fn close(&mut self) {
        self.plaintext.clear();
        self.release_source();
        self.state.close();
    }

    /// `true` while more plaintext may still come out of [`read`](Self::read).
    pub fn has_bytes_available(&self) -> bool {
        !self.plaintext.is_empty()
            || (!self.state.is_failed()
                && self
                    .source
                    .as_ref()
                    .is_some_and(|source| source.has_bytes_available()))
    }

    /// Source released and every produced byte handed out, or failed.
    pub fn is_finished(&self) -> bool {
        self.state.is_failed() || (self.source.is_none() && self.plaintext.is_empty())
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    pub fn has_failed(&self) -> bool {
        self.state.is_failed()
    }

    pub const fn state(&self) -> StreamState {
        self.state
    }

    pub const fn status(&self) -> CipherStreamStatus {
        self.state.status()
    }
}

impl<S: ByteSource, E: CipherEngine> Read for CipherReader<S, E> {
    /// Blocks until at least one byte is produced or the stream ends, so a
    /// zero return always means end of stream.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            match CipherReader::read(self, buf) {
                Ok(0) if !self.is_finished() => continue,
                Ok(n) => return Ok(n),
                Err(status) => return Err(io::Error::new(ErrorKind::InvalidData, status)),
            }
        }
    }
}
