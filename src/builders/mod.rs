//! # Builders
//!
//! Fluent constructors with file-format defaults.
//!
//! - [`key_derivation_builder`] - PBKDF2 parameter sets for [`EncryptedFile`](crate::EncryptedFile)

pub mod key_derivation_builder;

pub use key_derivation_builder::KeyDerivationBuilder;
