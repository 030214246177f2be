//! Shared incremental-input interface of [`Digest`](super::digest::Digest),
//! [`Hmac`](super::hmac::Hmac) and [`Cryptor`](crate::engine::Cryptor).

use crate::status::EngineStatus;

/// Anything that absorbs bytes incrementally and can be chained with `?`.
///
/// ```
/// use cipherstream_rs::{Digest, DigestAlgorithm, Updateable};
///
/// let mut digest = Digest::new(DigestAlgorithm::Sha256);
/// digest.update_str("ab")?.update_bytes(b"c")?;
/// assert_eq!(digest.finalize().len(), 32);
/// # Ok::<(), cipherstream_rs::EngineStatus>(())
/// ```
pub trait Updateable {
    fn update_bytes(&mut self, data: &[u8]) -> Result<&mut Self, EngineStatus>;

    /// UTF-8 bytes of `text`.
    fn update_str(&mut self, text: &str) -> Result<&mut Self, EngineStatus> {
        self.update_bytes(text.as_bytes())
    }
}
