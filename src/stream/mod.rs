//! # Byte Streams
//!
//! The two capabilities the cipher adapters need from the stream they wrap.
//! Every [`std::io::Read`] is a [`ByteSource`] and every [`std::io::Write`] is
//! a [`ByteSink`], so files, sockets and in-memory cursors plug in directly.
//! Types that are not `Read`/`Write` (for example sources that know ahead of
//! time when they are drained) can implement the traits themselves.

pub(crate) mod buffer;

pub use buffer::grow_capacity;

use std::io::{self, ErrorKind, Read, Write};

/// Where a [`CipherReader`](crate::CipherReader) pulls ciphertext from.
pub trait ByteSource {
    /// `false` once the source knows it has nothing more to deliver. A source
    /// that cannot tell ahead of time keeps returning `true` and signals the
    /// end with a zero-length read instead.
    fn has_bytes_available(&self) -> bool {
        true
    }

    /// Read up to `buf.len()` bytes. `Ok(0)` means end of stream.
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Release the source. Called once, after the final block was produced or
    /// when the owning adapter is closed.
    fn close(&mut self) {}
}

/// Where a [`CipherWriter`](crate::CipherWriter) pushes ciphertext to.
pub trait ByteSink {
    /// Write as much of `data` as the sink accepts and return that count.
    /// A count below `data.len()` means the sink refused the rest.
    fn write_bytes(&mut self, data: &[u8]) -> io::Result<usize>;

    fn flush_bytes(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Flush and release the sink. Called at most once by the owning adapter.
    fn close(&mut self) -> io::Result<()> {
        self.flush_bytes()
    }
}

impl<R: Read> ByteSource for R {
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.read(buf) {
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }
}

impl<W: Write> ByteSink for W {
    fn write_bytes(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < data.len() {
            match self.write(&data[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(written)
    }

    fn flush_bytes(&mut self) -> io::Result<()> {
        self.flush()
    }
}
