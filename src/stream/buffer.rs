//! Internal buffers of the cipher adapters.

use crate::consts::{DEFAULT_BLOCK_UNIT, MAX_BUFFER_CAPACITY};
use tracing::trace;

/// Capacity a buffer should have to serve a request of `requested` bytes.
///
/// Grows to the smallest multiple of `unit` that holds `requested`, but never
/// beyond `cap`, and never shrinks below `current`.
pub fn grow_capacity(current: usize, requested: usize, unit: usize, cap: usize) -> usize {
    if requested <= current || unit == 0 {
        return current;
    }
    let rounded = requested.div_ceil(unit).saturating_mul(unit);
    rounded.min(cap).max(current)
}

/// Fixed-length scratch buffer the engine writes into.
///
/// Its length is its capacity: grown by [`grow_capacity`] for caller requests,
/// and stretched past the cap only when the engine itself needs more room.
#[derive(Debug)]
pub(crate) struct CipherBuffer {
    bytes: Vec<u8>,
}

impl CipherBuffer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; capacity.max(1)],
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Grow per the adapter policy to serve a request of `requested` bytes.
    pub(crate) fn reserve_for(&mut self, requested: usize) {
        let grown = grow_capacity(
            self.bytes.len(),
            requested,
            DEFAULT_BLOCK_UNIT,
            MAX_BUFFER_CAPACITY,
        );
        if grown > self.bytes.len() {
            trace!(from = self.bytes.len(), to = grown, "growing cipher buffer");
            self.bytes.resize(grown, 0);
        }
    }

    /// Make sure at least `len` bytes are addressable.
    pub(crate) fn ensure_len(&mut self, len: usize) {
        if len > self.bytes.len() {
            self.bytes.resize(len, 0);
        }
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

/// Plaintext produced by the engine but not yet handed to the caller.
#[derive(Debug, Default)]
pub(crate) struct PendingBuffer {
    buf: Vec<u8>,
    cursor: usize,
}

impl PendingBuffer {
    pub(crate) fn data(&self) -> &[u8] {
        &self.buf[self.cursor..]
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.cursor >= self.buf.len()
    }

    pub(crate) fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
    }

    /// Zeroed space of `len` bytes for the engine to write into.
    /// Only valid while the buffer is drained.
    pub(crate) fn prepare(&mut self, len: usize) -> &mut [u8] {
        debug_assert!(self.is_empty(), "pending plaintext would be overwritten");
        self.buf.clear();
        self.buf.resize(len, 0);
        self.cursor = 0;
        &mut self.buf
    }

    /// Keep the first `len` prepared bytes.
    pub(crate) fn commit(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    /// Move as much pending data into `out` as fits.
    pub(crate) fn drain_into(&mut self, out: &mut [u8]) -> usize {
        let n = self.data().len().min(out.len());
        out[..n].copy_from_slice(&self.buf[self.cursor..self.cursor + n]);
        self.cursor += n;
        if self.is_empty() {
            self.clear();
        }
        n
    }
}
