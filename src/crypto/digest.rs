//! Message digests: MD2, MD4, MD5 and the SHA-1/SHA-2 family behind one type.

use super::updateable::Updateable;
use crate::status::EngineStatus;

use md2::Md2;
use md4::Md4;
use md5::Md5;
use sha1::Sha1;
use sha2::digest::DynDigest;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Md2,
    Md4,
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// Digest length in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            DigestAlgorithm::Md2 | DigestAlgorithm::Md4 | DigestAlgorithm::Md5 => 16,
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha224 => 28,
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 => 64,
        }
    }
}

/// Incremental hash over any [`DigestAlgorithm`].
pub struct Digest {
    algorithm: DigestAlgorithm,
    state: Box<dyn DynDigest + Send>,
}

impl Digest {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        let state: Box<dyn DynDigest + Send> = match algorithm {
            DigestAlgorithm::Md2 => Box::new(Md2::default()),
            DigestAlgorithm::Md4 => Box::new(Md4::default()),
            DigestAlgorithm::Md5 => Box::new(Md5::default()),
            DigestAlgorithm::Sha1 => Box::new(Sha1::default()),
            DigestAlgorithm::Sha224 => Box::new(Sha224::default()),
            DigestAlgorithm::Sha256 => Box::new(Sha256::default()),
            DigestAlgorithm::Sha384 => Box::new(Sha384::default()),
            DigestAlgorithm::Sha512 => Box::new(Sha512::default()),
        };
        Self { algorithm, state }
    }

    /// One-shot digest of `data`.
    pub fn digest(algorithm: DigestAlgorithm, data: &[u8]) -> Vec<u8> {
        let mut digest = Self::new(algorithm);
        digest.update(data);
        digest.finalize()
    }

    pub const fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.state.update(data);
        self
    }

    pub fn finalize(self) -> Vec<u8> {
        self.state.finalize().into_vec()
    }
}

impl Updateable for Digest {
    fn update_bytes(&mut self, data: &[u8]) -> Result<&mut Self, EngineStatus> {
        Ok(self.update(data))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Digest")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
