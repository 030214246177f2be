//! HMAC over the same hash family as [`Digest`](super::digest::Digest).

use super::digest::DigestAlgorithm;
use super::updateable::Updateable;
use crate::status::EngineStatus;

use ::hmac::Mac;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use std::fmt;

/// Hash functions HMAC can be keyed over. MD2 and MD4 are digest-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HmacAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl HmacAlgorithm {
    /// The underlying hash.
    pub const fn digest(self) -> DigestAlgorithm {
        match self {
            HmacAlgorithm::Md5 => DigestAlgorithm::Md5,
            HmacAlgorithm::Sha1 => DigestAlgorithm::Sha1,
            HmacAlgorithm::Sha224 => DigestAlgorithm::Sha224,
            HmacAlgorithm::Sha256 => DigestAlgorithm::Sha256,
            HmacAlgorithm::Sha384 => DigestAlgorithm::Sha384,
            HmacAlgorithm::Sha512 => DigestAlgorithm::Sha512,
        }
    }

    /// MAC length in bytes, equal to the digest length.
    pub const fn output_len(self) -> usize {
        self.digest().output_len()
    }
}

enum MacState {
    Md5(::hmac::Hmac<Md5>),
    Sha1(::hmac::Hmac<Sha1>),
    Sha224(::hmac::Hmac<Sha224>),
    Sha256(::hmac::Hmac<Sha256>),
    Sha384(::hmac::Hmac<Sha384>),
    Sha512(::hmac::Hmac<Sha512>),
}

macro_rules! with_mac {
    ($state:expr, $mac:ident => $body:expr) => {
        match $state {
            MacState::Md5($mac) => $body,
            MacState::Sha1($mac) => $body,
            MacState::Sha224($mac) => $body,
            MacState::Sha256($mac) => $body,
            MacState::Sha384($mac) => $body,
            MacState::Sha512($mac) => $body,
        }
    };
}

/// Keyed message authentication code.
pub struct Hmac {
    algorithm: HmacAlgorithm,
    state: MacState,
}

impl Hmac {
    /// Keys of any length are accepted; long keys are hashed first.
    pub fn new(algorithm: HmacAlgorithm, key: &[u8]) -> Result<Self, EngineStatus> {
        fn keyed<M: Mac + ::hmac::digest::KeyInit>(key: &[u8]) -> Result<M, EngineStatus> {
            <M as Mac>::new_from_slice(key).map_err(|_| EngineStatus::ParamError)
        }

        let state = match algorithm {
            HmacAlgorithm::Md5 => MacState::Md5(keyed(key)?),
            HmacAlgorithm::Sha1 => MacState::Sha1(keyed(key)?),
            HmacAlgorithm::Sha224 => MacState::Sha224(keyed(key)?),
            HmacAlgorithm::Sha256 => MacState::Sha256(keyed(key)?),
            HmacAlgorithm::Sha384 => MacState::Sha384(keyed(key)?),
            HmacAlgorithm::Sha512 => MacState::Sha512(keyed(key)?),
        };
        Ok(Self { algorithm, state })
    }

    /// One-shot MAC of `data` under `key`.
    pub fn mac(algorithm: HmacAlgorithm, key: &[u8], data: &[u8]) -> Result<Vec<u8>, EngineStatus> {
        let mut hmac = Self::new(algorithm, key)?;
        hmac.update(data);
        Ok(hmac.finalize())
    }

    pub const fn algorithm(&self) -> HmacAlgorithm {
        self.algorithm
    }

    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        with_mac!(&mut self.state, mac => mac.update(data));
        self
    }

    pub fn finalize(self) -> Vec<u8> {
        with_mac!(self.state, mac => mac.finalize().into_bytes().to_vec())
    }
}

impl Updateable for Hmac {
    fn update_bytes(&mut self, data: &[u8]) -> Result<&mut Self, EngineStatus> {
        Ok(self.update(data))
    }
}

impl fmt::Debug for Hmac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hmac")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
