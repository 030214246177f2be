//! src/crypto/rng.rs
//! Secure randomness for IVs and other fixed-size secrets.
//!
//! Adds `T::try_random()` to every fixed-size secret (such as Iv16),
//! backed by the OS random source. Failure to read the OS source is reported
//! as [`EngineStatus::RngFailure`] instead of being swallowed.

use crate::aliases::SecretBytes;
use crate::status::EngineStatus;
use rand::{rngs::OsRng, TryRngCore};
use tracing::error;
use zeroize::Zeroize;

/// Extension trait – gives `.try_random()` to all fixed-size secret types
pub trait SecureRandomExt: Sized {
    /// Generate a cryptographically secure random instance of this type
    fn try_random() -> Result<Self, EngineStatus>;
}

impl<const N: usize> SecureRandomExt for SecretBytes<N> {
    #[inline]
    fn try_random() -> Result<Self, EngineStatus> {
        let mut bytes = [0u8; N];
        fill_random(&mut bytes)?;
        let secret = SecretBytes::new(bytes);
        bytes.zeroize();
        Ok(secret)
    }
}

/// Fill `dest` from the OS random source.
pub fn fill_random(dest: &mut [u8]) -> Result<(), EngineStatus> {
    OsRng.try_fill_bytes(dest).map_err(|err| {
        error!(%err, len = dest.len(), "OS random source failed");
        EngineStatus::RngFailure
    })
}

/// `count` fresh random bytes.
pub fn generate_bytes(count: usize) -> Result<Vec<u8>, EngineStatus> {
    let mut bytes = vec![0u8; count];
    fill_random(&mut bytes)?;
    Ok(bytes)
}
