//! src/crypto/kdf/pbkdf2.rs

use super::PseudoRandomAlgorithm;
use crate::aliases::SecretKey;
use crate::error::CipherStreamError;

use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Rounds run once to measure the cost of a single round during calibration.
const CALIBRATION_PROBE_ROUNDS: u32 = 1_000;

/// Derive `key_len` bytes from `password` and `salt` with PBKDF2-HMAC-`prf`.
///
/// Deterministic: identical inputs always give identical keys.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    prf: PseudoRandomAlgorithm,
    rounds: u32,
    key_len: usize,
) -> Result<SecretKey, CipherStreamError> {
    if rounds == 0 {
        return Err(CipherStreamError::Kdf("PBKDF2 rounds must be ≥1".into()));
    }
    if key_len == 0 {
        return Err(CipherStreamError::Kdf("derived key length must be ≥1".into()));
    }

    let mut key = SecretKey::new(vec![0u8; key_len]);
    derive_into(password, salt, prf, rounds, key.expose_secret_mut())?;
    trace!(?prf, rounds, key_len, "derived PBKDF2 key");
    Ok(key)
}

fn derive_into(
    password: &[u8],
    salt: &[u8],
    prf: PseudoRandomAlgorithm,
    rounds: u32,
    out: &mut [u8],
) -> Result<(), CipherStreamError> {
    let derived = match prf {
        PseudoRandomAlgorithm::Sha1 => pbkdf2::<Hmac<Sha1>>(password, salt, rounds, out),
        PseudoRandomAlgorithm::Sha224 => pbkdf2::<Hmac<Sha224>>(password, salt, rounds, out),
        PseudoRandomAlgorithm::Sha256 => pbkdf2::<Hmac<Sha256>>(password, salt, rounds, out),
        PseudoRandomAlgorithm::Sha384 => pbkdf2::<Hmac<Sha384>>(password, salt, rounds, out),
        PseudoRandomAlgorithm::Sha512 => pbkdf2::<Hmac<Sha512>>(password, salt, rounds, out),
    };
    derived.map_err(|e| CipherStreamError::Kdf(format!("PBKDF2 failed: {e}")))
}

/// Estimate the round count that makes one derivation take about `target`.
///
/// Measures a fixed probe on this machine with inputs of the given sizes and
/// extrapolates linearly. Always returns at least 1.
///
/// Fails with [`CipherStreamError::Kdf`] when `key_len` is zero.
pub fn calibrate(
    password_len: usize,
    salt_len: usize,
    prf: PseudoRandomAlgorithm,
    key_len: usize,
    target: Duration,
) -> Result<u32, CipherStreamError> {
    if key_len == 0 {
        return Err(CipherStreamError::Kdf("derived key length must be ≥1".into()));
    }

    let password = vec![0x61u8; password_len];
    let salt = vec![0x73u8; salt_len];
    let mut out = SecretKey::new(vec![0u8; key_len]);

    let started = Instant::now();
    derive_into(
        &password,
        &salt,
        prf,
        CALIBRATION_PROBE_ROUNDS,
        out.expose_secret_mut(),
    )?;
    let probe_nanos = started.elapsed().as_nanos().max(1);

    let rounds = target.as_nanos() * u128::from(CALIBRATION_PROBE_ROUNDS) / probe_nanos;
    let rounds = u32::try_from(rounds).unwrap_or(u32::MAX).max(1);
    debug!(?prf, ?target, probe_nanos, rounds, "calibrated PBKDF2 rounds");
    Ok(rounds)
}
