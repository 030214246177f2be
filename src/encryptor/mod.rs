// src/encryptor/mod.rs

//! Encryption side: the write adapter and the IV-prefixed format on top of it.
//!
//! Core API: `encrypt_stream(input, output, key)?` for whole streams,
//! `open_encrypting_writer(sink, key, capacity)?` for incremental writes.

pub(crate) mod encrypt;
pub(crate) mod writer;

pub use encrypt::{encrypt_stream, open_encrypting_writer};
pub use writer::CipherWriter;
