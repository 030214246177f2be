//! # Status Types
//!
//! Two layers of status live here:
//!
//! - [`EngineStatus`] is the failure taxonomy reported by a [`CipherEngine`](crate::engine::CipherEngine).
//! - [`CipherStreamStatus`] is what a [`CipherReader`](crate::CipherReader) or
//!   [`CipherWriter`](crate::CipherWriter) exposes to its caller. It wraps engine
//!   failures and adds the transfer errors that can only happen between an
//!   adapter and its underlying byte stream.
//!
//! [`StreamState`] is the forward-only state machine every adapter carries.

use thiserror::Error;

/// Failure reported by a cipher engine.
///
/// `AlignmentError` is the one variant callers are expected to see in normal
/// use: it is what finalizing an unpadded operation over a misaligned total
/// input produces.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineStatus {
    /// Illegal parameter value (bad IV length, unsupported combination, ...).
    #[error("parameter error")]
    ParamError,

    /// Output buffer is smaller than the engine needs for this call.
    #[error("buffer too small")]
    BufferTooSmall,

    #[error("memory failure")]
    MemoryFailure,

    /// Total input was not a whole number of blocks and padding is disabled,
    /// or a padded decryption ended without a complete final block.
    #[error("alignment error")]
    AlignmentError,

    /// Decrypted padding did not verify.
    #[error("decode error")]
    DecodeError,

    #[error("unimplemented")]
    Unimplemented,

    #[error("overflow")]
    Overflow,

    /// The OS random source could not be read.
    #[error("random number generator failure")]
    RngFailure,

    /// Key is longer than any size the algorithm accepts.
    #[error("invalid key size")]
    KeySizeError,
}

/// Status of a cipher stream adapter.
///
/// Anything other than [`CipherStreamStatus::Ok`] is sticky: once recorded,
/// the adapter stays failed until it is dropped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherStreamStatus {
    #[error("ok")]
    Ok,

    /// The cipher engine rejected an update or final step.
    #[error("cipher engine failure: {0}")]
    Engine(#[from] EngineStatus),

    /// The sink accepted fewer ciphertext bytes than an update produced.
    #[error("inner transfer error: sink did not accept every ciphertext byte")]
    InnerTransferError,

    /// The underlying source failed to deliver ciphertext.
    #[error("outer transfer error: source failed to deliver ciphertext")]
    OuterTransferError,

    /// The final block could not be handed to the sink, or the sink failed to close.
    #[error("final transfer error: final block was not fully written")]
    FinalTransferError,
}

impl CipherStreamStatus {
    #[inline]
    pub const fn is_ok(&self) -> bool {
        matches!(self, CipherStreamStatus::Ok)
    }

    /// `Ok(())` for [`CipherStreamStatus::Ok`], `Err(self)` otherwise.
    #[inline]
    pub fn into_result(self) -> Result<(), CipherStreamStatus> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Lifecycle of a stream adapter.
///
/// Transitions only move forward: `Open -> Failed` or `Open -> Closed`.
/// `Failed` is terminal; the only recovery is to drop the adapter and open a
/// new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Open,
    Failed(CipherStreamStatus),
    Closed,
}

impl StreamState {
    /// Status visible to callers for this state.
    #[inline]
    pub const fn status(&self) -> CipherStreamStatus {
        match self {
            StreamState::Failed(status) => *status,
            StreamState::Open | StreamState::Closed => CipherStreamStatus::Ok,
        }
    }

    #[inline]
    pub const fn is_open(&self) -> bool {
        matches!(self, StreamState::Open)
    }

    #[inline]
    pub const fn is_failed(&self) -> bool {
        matches!(self, StreamState::Failed(_))
    }

    /// Record a failure. Returns the status that is now in effect, which is the
    /// first failure ever recorded: later failures never overwrite it.
    pub(crate) fn fail(&mut self, status: CipherStreamStatus) -> CipherStreamStatus {
        debug_assert!(!status.is_ok(), "Ok is not a failure");
        match *self {
            StreamState::Failed(first) => first,
            StreamState::Open | StreamState::Closed => {
                *self = StreamState::Failed(status);
                status
            }
        }
    }

    /// `Open -> Closed`; no effect on `Failed` or `Closed`.
    #[inline]
    pub(crate) fn close(&mut self) {
        if self.is_open() {
            *self = StreamState::Closed;
        }
    }
}
