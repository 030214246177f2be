// src/decryptor/mod.rs

//! Decryption side: the read adapter and the IV-prefixed format on top of it.
//!
//! Core API: `decrypt_stream(input, output, key)?` for whole streams,
//! `open_decrypting_reader(source, key, capacity)?` for incremental reads.

pub(crate) mod decrypt;
pub(crate) mod reader;

pub use decrypt::{decrypt_stream, open_decrypting_reader};
pub use reader::CipherReader;
