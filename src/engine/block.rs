//! Object-safe single-block primitive over the RustCrypto block ciphers.

use super::Algorithm;
use crate::status::EngineStatus;

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};
use blowfish::Blowfish;
use cast5::Cast5;
use des::{Des, TdesEde3};
use rc2::Rc2;

pub(crate) trait BlockPrimitive: Send {
    fn encrypt_in_place(&self, block: &mut [u8]);
    fn decrypt_in_place(&self, block: &mut [u8]);
}

impl<C> BlockPrimitive for C
where
    C: BlockEncrypt + BlockDecrypt + Send,
{
    #[inline(always)]
    fn encrypt_in_place(&self, block: &mut [u8]) {
        BlockEncrypt::encrypt_block(self, GenericArray::from_mut_slice(block));
    }

    #[inline(always)]
    fn decrypt_in_place(&self, block: &mut [u8]) {
        BlockDecrypt::decrypt_block(self, GenericArray::from_mut_slice(block));
    }
}

/// Key the cipher for `algorithm`. `key` must already be a valid length.
pub(crate) fn new_primitive(
    algorithm: Algorithm,
    key: &[u8],
) -> Result<Box<dyn BlockPrimitive>, EngineStatus> {
    match (algorithm, key.len()) {
        (Algorithm::Aes, 16) => keyed::<Aes128>(key),
        (Algorithm::Aes, 24) => keyed::<Aes192>(key),
        (Algorithm::Aes, 32) => keyed::<Aes256>(key),
        (Algorithm::Des, 8) => keyed::<Des>(key),
        (Algorithm::TripleDes, 24) => keyed::<TdesEde3>(key),
        (Algorithm::Cast, _) => keyed::<Cast5>(key),
        (Algorithm::Rc2, _) => keyed::<Rc2>(key),
        (Algorithm::Blowfish, _) => keyed::<Blowfish>(key),
        _ => Err(EngineStatus::KeySizeError),
    }
}

fn keyed<C>(key: &[u8]) -> Result<Box<dyn BlockPrimitive>, EngineStatus>
where
    C: BlockPrimitive + KeyInit + 'static,
{
    let cipher = C::new_from_slice(key).map_err(|_| EngineStatus::KeySizeError)?;
    Ok(Box::new(cipher))
}
