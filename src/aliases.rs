//! # Secret Buffers
//!
//! Secret-holding buffers used across the crate, wiped on drop with
//! [`zeroize`]. Every type here needs an explicit `.expose_secret()` /
//! `.expose_secret_mut()` to reach the bytes and prints as `[REDACTED]`.
//!
//! - [`Iv16`] - one AES block of initialization vector
//! - [`SecretKey`] - raw or derived cipher key of any length

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fixed-size secret bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes<const N: usize>([u8; N]);

impl<const N: usize> SecretBytes<N> {
    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn expose_secret(&self) -> &[u8; N] {
        &self.0
    }

    #[inline]
    pub fn expose_secret_mut(&mut self) -> &mut [u8; N] {
        &mut self.0
    }
}

impl<const N: usize> fmt::Debug for SecretBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

pub type Iv16 = SecretBytes<16>; // IV header of an encrypted file

/// Variable-length key material.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn expose_secret(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn expose_secret_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
