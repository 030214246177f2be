//! src/encryptor/writer.rs
//! Write adapter: plaintext in from the caller, ciphertext out to a [`ByteSink`].

use crate::consts::DEFAULT_BLOCK_UNIT;
use crate::engine::{CipherEngine, StreamCryptor};
use crate::status::{CipherStreamStatus, StreamState};
use crate::stream::buffer::CipherBuffer;
use crate::stream::ByteSink;

use std::io::{self, Write};
use tracing::{debug, trace, warn};

/// Encrypting (or, with a decrypting engine, decrypting) writer.
///
/// Every [`write`](Self::write) runs the data through the engine and hands
/// whatever whole blocks come out to the sink. The final, padded block only
/// reaches the sink on [`close`](Self::close); a writer that is dropped
/// without being closed produces truncated ciphertext.
///
/// Any failure is sticky: every later call returns the same status.
pub struct CipherWriter<S: ByteSink, E: CipherEngine = StreamCryptor> {
    engine: E,
    sink: Option<S>,
    ciphertext: CipherBuffer,
    state: StreamState,
    aborted: bool,
}

impl<S: ByteSink, E: CipherEngine> CipherWriter<S, E> {
    /// Wrap `sink` with the default initial buffer capacity.
    pub fn new(engine: E, sink: S) -> Self {
        Self::with_capacity(engine, sink, DEFAULT_BLOCK_UNIT)
    }

    pub fn with_capacity(engine: E, sink: S, capacity: usize) -> Self {
        debug!(capacity, block_size = engine.block_size(), "cipher writer opened");
        Self {
            engine,
            sink: Some(sink),
            ciphertext: CipherBuffer::with_capacity(capacity),
            state: StreamState::Open,
            aborted: false,
        }
    }

    /// Transform `data` and pass the result on to the sink.
    ///
    /// Returns the number of **ciphertext** bytes the sink accepted, which
    /// differs from `data.len()` while the engine buffers a partial block.
    /// The [`io::Write`] impl reports consumed input instead.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, CipherStreamStatus> {
        if let StreamState::Failed(status) = self.state {
            return Err(status);
        }
        if self.state == StreamState::Closed || data.is_empty() {
            return Ok(0);
        }

        self.ciphertext.reserve_for(data.len());
        let block = self.engine.block_size();
        let chunk_len = self.ciphertext.capacity().saturating_sub(block).max(block);

        let mut written = 0;
        for chunk in data.chunks(chunk_len) {
            written += self.write_chunk(chunk)?;
        }
        Ok(written)
    }

    /// [`write`](Self::write) the UTF-8 bytes of `text`.
    pub fn write_utf8(&mut self, text: &str) -> Result<usize, CipherStreamStatus> {
        self.write(text.as_bytes())
    }

    fn write_chunk(&mut self, chunk: &[u8]) -> Result<usize, CipherStreamStatus> {
        self.ciphertext
            .ensure_len(self.engine.output_len(chunk.len(), false));
        let produced = match self.engine.update(chunk, self.ciphertext.as_mut_slice()) {
            Ok(produced) => produced,
            Err(status) => return Err(self.fail(status.into())),
        };
        trace!(input = chunk.len(), produced, "cipher writer update");
        if produced == 0 {
            return Ok(0);
        }
        self.transfer(produced, CipherStreamStatus::InnerTransferError)
    }

    /// Hand the first `produced` buffered bytes to the sink. Anything short of
    /// all of them records `on_short`.
    fn transfer(
        &mut self,
        produced: usize,
        on_short: CipherStreamStatus,
    ) -> Result<usize, CipherStreamStatus> {
        let Some(sink) = self.sink.as_mut() else {
            return Err(self.fail(on_short));
        };
        match sink.write_bytes(&self.ciphertext.as_slice()[..produced]) {
            Ok(accepted) if accepted == produced => Ok(accepted),
            Ok(accepted) => {
                warn!(produced, accepted, "sink accepted a short write");
                Err(self.fail(on_short))
            }
            Err(err) => {
                warn!(%err, produced, "sink write failed");
                Err(self.fail(on_short))
            }
        }
    }

    /// Finalize the engine and write the final block.
    fn flush_final(&mut self) -> Result<(), CipherStreamStatus> {
        self.ciphertext.ensure_len(self.engine.output_len(0, true));
        let produced = match self.engine.finalize(self.ciphertext.as_mut_slice()) {
            Ok(produced) => produced,
            Err(status) => return Err(self.fail(status.into())),
        };
        trace!(produced, "cipher writer finalized");
        if produced > 0 {
            self.transfer(produced, CipherStreamStatus::FinalTransferError)?;
        }
        Ok(())
    }

    fn fail(&mut self, status: CipherStreamStatus) -> CipherStreamStatus {
        let status = self.state.fail(status);
        warn!(%status, "cipher writer failed");
        status
    }

    /// Write the final block, flush and release the sink.
    ///
    /// Idempotent: later calls return the same result without touching the
    /// sink again. The sink is released even when finalizing fails.
    pub fn close(&mut self) -> Result<(), CipherStreamStatus> {
        if self.state.is_open() {
            // A failure is recorded in `state` and reported below.
            let _ = self.flush_final();
        }
        if let Some(mut sink) = self.sink.take() {
            if let Err(err) = sink.close() {
                warn!(%err, "sink failed to close");
                if self.state.is_open() {
                    self.fail(CipherStreamStatus::FinalTransferError);
                }
            }
        }
        if self.state.is_open() {
            self.state.close();
            debug!("cipher writer closed");
        }
        self.state.status().into_result()
    }

    /// Release the sink without finalizing. Whatever the sink already holds
    /// stays there; the final block is never written.
    pub fn abort(&mut self) {
        if self.state.is_open() {
            self.state.close();
            self.aborted = true;
            debug!("cipher writer aborted");
        }
        self.sink = None;
    }

    pub fn was_aborted(&self) -> bool {
        self.aborted
    }

    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    pub fn has_failed(&self) -> bool {
        self.state.is_failed()
    }

    /// `false` once the writer is closed, aborted or failed.
    pub fn has_space_available(&self) -> bool {
        self.state.is_open() && self.sink.is_some()
    }

    pub const fn state(&self) -> StreamState {
        self.state
    }

    pub const fn status(&self) -> CipherStreamStatus {
        self.state.status()
    }
}

impl<S: ByteSink, E: CipherEngine> Write for CipherWriter<S, E> {
    /// Reports `buf.len()` on success: the input is consumed even when the
    /// engine holds part of it back until the next block fills up.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() || self.state == StreamState::Closed {
            return Ok(0);
        }
        CipherWriter::write(self, buf)
            .map(|_| buf.len())
            .map_err(io::Error::other)
    }

    fn flush(&mut self) -> io::Result<()> {
        if let StreamState::Failed(status) = self.state {
            return Err(io::Error::other(status));
        }
        match self.sink.as_mut() {
            Some(sink) => sink.flush_bytes(),
            None => Ok(()),
        }
    }
}

impl<S: ByteSink, E: CipherEngine> Drop for CipherWriter<S, E> {
    fn drop(&mut self) {
        if self.state.is_open() && self.sink.is_some() {
            warn!("cipher writer dropped without close; final block was not written");
        }
    }
}
