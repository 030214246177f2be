//! Utility functions used across the library.

/// XORs `other` into `block` in place.
///
/// Both slices are one cipher block long; only `block.len()` bytes are touched.
#[inline(always)]
pub fn xor_in_place(block: &mut [u8], other: &[u8]) {
    for (b, o) in block.iter_mut().zip(other) {
        *b ^= o;
    }
}

/// Validates PKCS#7 padding on one decrypted block and returns the pad length.
///
/// Every pad byte is inspected regardless of where a mismatch occurs.
#[inline]
pub fn pkcs7_pad_len(block: &[u8]) -> Option<usize> {
    let pad = *block.last()? as usize;
    if pad == 0 || pad > block.len() {
        return None;
    }

    let mut diff = 0u8;
    for &byte in &block[block.len() - pad..] {
        diff |= byte ^ pad as u8;
    }
    (diff == 0).then_some(pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_is_self_inverse() {
        let mut block = [0x11u8, 0x22, 0x33, 0x44];
        let key = [0xffu8, 0x00, 0x0f, 0xf0];
        xor_in_place(&mut block, &key);
        assert_eq!(block, [0xee, 0x22, 0x3c, 0xb4]);
        xor_in_place(&mut block, &key);
        assert_eq!(block, [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn pkcs7_accepts_valid_padding() {
        let mut block = [0u8; 16];
        block[12..].copy_from_slice(&[4, 4, 4, 4]);
        assert_eq!(pkcs7_pad_len(&block), Some(4));
        assert_eq!(pkcs7_pad_len(&[16u8; 16]), Some(16));
        assert_eq!(pkcs7_pad_len(&[8u8; 8]), Some(8));
    }

    #[test]
    fn pkcs7_rejects_bad_padding() {
        assert_eq!(pkcs7_pad_len(&[0u8; 16]), None);
        assert_eq!(pkcs7_pad_len(&[17u8; 16]), None);
        let mut block = [3u8; 16];
        block[13] = 2;
        assert_eq!(pkcs7_pad_len(&block), None);
        assert_eq!(pkcs7_pad_len(&[]), None);
    }
}
