//! # Error Types
//!
//! Setup and convenience-layer errors. Per-call failures of an open stream are
//! reported as [`CipherStreamStatus`] instead; see [`crate::status`].

use crate::status::{CipherStreamStatus, EngineStatus};
use thiserror::Error;

/// The error type for opening streams, deriving keys and the whole-payload
/// helpers built on top of the stream adapters.
#[derive(Error, Debug)]
pub enum CipherStreamError {
    /// I/O error outside of an adapter (copying plaintext in or out).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The underlying file or stream could not be opened.
    #[error("failed to open underlying stream: {0}")]
    CreateStream(#[source] std::io::Error),

    /// The sink accepted fewer IV bytes than one block.
    #[error("header write failure: wrote {written} of {expected} IV bytes")]
    HeaderWrite { expected: usize, written: usize },

    /// The source ended before one block of IV could be read.
    #[error("header read failure: read {read} of {expected} IV bytes")]
    HeaderRead { expected: usize, read: usize },

    /// The cipher engine could not be constructed or the RNG failed.
    #[error("engine error: {0}")]
    Engine(#[from] EngineStatus),

    /// An adapter entered its failed state.
    #[error("stream error: {0}")]
    Stream(#[from] CipherStreamStatus),

    /// Key derivation parameters were rejected.
    #[error("key derivation error: {0}")]
    Kdf(String),

    #[error("plaintext is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
