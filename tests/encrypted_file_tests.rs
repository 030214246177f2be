//! tests/encrypted_file_tests.rs
//! IV-prefixed file envelope: layout, round trips and failure modes

mod common;
use common::{envelope_len, payload, QUICK_BROWN_FOX, TEST_PASSWORD};

use cipherstream_rs::engine::cryptor::decrypt;
use cipherstream_rs::{
    Algorithm, CipherStreamError, CipherStreamStatus, EncryptedFile, EngineStatus, KeyDerivation,
    Mode, Padding, PseudoRandomAlgorithm,
};
use std::fs;
use std::io::Read;
use tempfile::tempdir;

#[test]
fn password_round_trip_and_file_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fox.enc");
    let file = EncryptedFile::with_password(&path, TEST_PASSWORD).unwrap();

    let mut writer = file.open_output_stream().unwrap();
    let written = writer.write_utf8(QUICK_BROWN_FOX).unwrap();
    assert_eq!(written, 32);
    writer.close().unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), envelope_len(QUICK_BROWN_FOX.len()));
    assert_eq!(fs::metadata(&path).unwrap().len(), 64);

    let mut reader = file.open_input_stream().unwrap();
    assert_eq!(reader.read_all_text().unwrap(), QUICK_BROWN_FOX);
    assert!(reader.is_closed());
}

#[test]
fn layout_is_iv_then_cbc_ciphertext() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("layout.enc");
    let key = KeyDerivation::default().derive(TEST_PASSWORD).unwrap();
    let file = EncryptedFile::with_password(&path, TEST_PASSWORD).unwrap();
    file.write_all(QUICK_BROWN_FOX.as_bytes()).unwrap();

    let raw = fs::read(&path).unwrap();
    let (iv, ciphertext) = raw.split_at(16);
    let plaintext = decrypt(
        Algorithm::Aes,
        Mode::Cbc,
        Padding::Pkcs7,
        key.expose_secret(),
        iv,
        ciphertext,
    )
    .unwrap();
    assert_eq!(plaintext, QUICK_BROWN_FOX.as_bytes());
}

#[test]
fn every_write_uses_a_fresh_iv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fresh.enc");
    let file = EncryptedFile::with_key(&path, b"0123456789abcdef").unwrap();

    file.write_all(b"same plaintext").unwrap();
    let first = fs::read(&path).unwrap();
    file.write_all(b"same plaintext").unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first.len(), second.len());
    assert_ne!(first[..16], second[..16]);
    assert_eq!(file.read_all().unwrap(), b"same plaintext");
}

#[test]
fn payload_sizes_round_trip() {
    let dir = tempdir().unwrap();
    for len in [0usize, 1, 15, 16, 17, 1023, 1024, 1025, 70_000] {
        let path = dir.path().join(format!("size_{len}.enc"));
        let file = EncryptedFile::with_key(&path, b"sixteen byte key").unwrap();
        let plaintext = payload(len);

        file.write_all(&plaintext).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), envelope_len(len), "len {len}");
        assert_eq!(file.read_all().unwrap(), plaintext, "len {len}");
    }
}

#[test]
fn chunked_writes_and_std_reads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chunked.enc");
    let file = EncryptedFile::with_password_and_salt(&path, TEST_PASSWORD, "pepper").unwrap();
    let plaintext = payload(100_000);

    let mut writer = file.open_output_stream_with_capacity(4096).unwrap();
    for piece in plaintext.chunks(777) {
        writer.write(piece).unwrap();
    }
    writer.close().unwrap();

    let mut reader = file.open_input_stream_with_capacity(512).unwrap();
    let mut decrypted = Vec::new();
    reader.read_to_end(&mut decrypted).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn salt_and_kdf_parameters_select_the_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("params.enc");

    let kdf = KeyDerivation::builder()
        .with_salt("a different salt")
        .with_prf(PseudoRandomAlgorithm::Sha512)
        .with_rounds(50)
        .with_key_len(32)
        .build();
    let writer_side = EncryptedFile::with_key_derivation(&path, TEST_PASSWORD, &kdf).unwrap();
    writer_side.write_all(QUICK_BROWN_FOX.as_bytes()).unwrap();

    let reader_side = EncryptedFile::with_key_derivation(&path, TEST_PASSWORD, &kdf).unwrap();
    assert_eq!(reader_side.read_all_text().unwrap(), QUICK_BROWN_FOX);

    // Default parameters derive a different key; the payload must not come back
    let defaults = EncryptedFile::with_password(&path, TEST_PASSWORD).unwrap();
    match defaults.read_all() {
        Ok(plaintext) => assert_ne!(plaintext, QUICK_BROWN_FOX.as_bytes()),
        Err(err) => assert!(matches!(err, CipherStreamError::Stream(_)), "{err}"),
    }
}

#[test]
fn wrong_password_does_not_decrypt() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wrong.enc");
    EncryptedFile::with_password(&path, TEST_PASSWORD)
        .unwrap()
        .write_all(QUICK_BROWN_FOX.as_bytes())
        .unwrap();

    let wrong = EncryptedFile::with_password(&path, "not the password").unwrap();
    match wrong.read_all() {
        Ok(plaintext) => assert_ne!(plaintext, QUICK_BROWN_FOX.as_bytes()),
        Err(err) => assert!(matches!(err, CipherStreamError::Stream(_)), "{err}"),
    }
}

#[test]
fn missing_directory_is_a_create_stream_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir.enc");
    let file = EncryptedFile::with_password(&path, TEST_PASSWORD).unwrap();

    assert!(matches!(
        file.open_output_stream(),
        Err(CipherStreamError::CreateStream(_))
    ));
    assert!(matches!(
        file.open_input_stream(),
        Err(CipherStreamError::CreateStream(_))
    ));
}

#[test]
fn short_file_is_a_header_read_failure() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.enc");
    fs::write(&path, [0u8; 10]).unwrap();
    let file = EncryptedFile::with_password(&path, TEST_PASSWORD).unwrap();

    match file.open_input_stream() {
        Err(CipherStreamError::HeaderRead { expected, read }) => {
            assert_eq!(expected, 16);
            assert_eq!(read, 10);
        }
        other => panic!("expected HeaderRead, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn iv_only_file_fails_at_final_block() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("iv_only.enc");
    fs::write(&path, [0x11u8; 16]).unwrap();
    let file = EncryptedFile::with_password(&path, TEST_PASSWORD).unwrap();

    match file.read_all() {
        Err(CipherStreamError::Stream(status)) => assert_eq!(
            status,
            CipherStreamStatus::Engine(EngineStatus::AlignmentError)
        ),
        other => panic!("expected alignment failure, got {other:?}"),
    }
}

#[test]
fn unclosed_writer_leaves_a_truncated_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unclosed.enc");
    let file = EncryptedFile::with_key(&path, b"k").unwrap();

    {
        let mut writer = file.open_output_stream().unwrap();
        writer.write(&payload(40)).unwrap();
        // dropped without close
    }
    assert_eq!(fs::metadata(&path).unwrap().len(), 16 + 32);
    assert!(file.read_all().is_err());
}

#[test]
fn oversized_key_is_rejected() {
    let err = EncryptedFile::with_key("unused.enc", &[0u8; 33]).unwrap_err();
    assert!(matches!(
        err,
        CipherStreamError::Engine(EngineStatus::KeySizeError)
    ));
}

#[test]
fn debug_output_redacts_the_key() {
    let file = EncryptedFile::with_key("secret.enc", b"super secret key").unwrap();
    let debug = format!("{file:?}");
    assert!(debug.contains("secret.enc"));
    assert!(debug.contains("REDACTED"));
    assert!(!debug.contains("super secret key"));
    assert_eq!(file.path(), std::path::Path::new("secret.enc"));
}
