// src/crypto/mod.rs

//! Crypto primitives that sit beside the stream adapters: digests, HMAC,
//! PBKDF2 and secure randomness.

pub mod digest;
pub mod hmac;
pub mod kdf;
pub mod rng;
pub mod updateable;
