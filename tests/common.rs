//! tests/common.rs
//! Common constants and utilities shared across test files

#![allow(dead_code)] // Each test binary uses a different subset

use cipherstream_rs::{Algorithm, StreamCryptor};

/// Standard test password used across the envelope tests
pub const TEST_PASSWORD: &str = "Hello";

/// Plaintext used by the round-trip tests
pub const QUICK_BROWN_FOX: &str = "The quick brown fox jumps over the lazy dog.";

/// Short raw key, zero-padded to AES-128 by the engine
pub const TEST_KEY: &[u8] = b"key";

pub const TEST_IV: [u8; 16] = [0x24; 16];

pub fn aes_encryptor() -> StreamCryptor {
    StreamCryptor::encryptor(Algorithm::Aes, TEST_KEY, &TEST_IV).unwrap()
}

pub fn aes_decryptor() -> StreamCryptor {
    StreamCryptor::decryptor(Algorithm::Aes, TEST_KEY, &TEST_IV).unwrap()
}

/// Deterministic non-trivial payload of `len` bytes
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

/// Size of an `[IV][AES-CBC/PKCS#7]` file holding `plaintext_len` bytes
pub fn envelope_len(plaintext_len: usize) -> u64 {
    (16 + (plaintext_len / 16 + 1) * 16) as u64
}
