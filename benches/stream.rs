// benches/stream.rs
//! Stream adapter throughput: write-side encryption, read-side decryption, round trip

use cipherstream_rs::{decrypt_stream, encrypt_stream, Algorithm, CipherWriter, StreamCryptor};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::io::Cursor;

const KEY: &[u8; 16] = b"benchmark-key-16";

// --- Size constants ---
const KB: usize = 1024;
const MB: usize = 1024 * 1024;

fn format_size(bytes: usize) -> String {
    if bytes >= MB {
        format!("{} MiB", bytes / MB)
    } else if bytes >= KB {
        format!("{} KiB", bytes / KB)
    } else {
        format!("{bytes} B")
    }
}

fn bench_writer_chunking(c: &mut Criterion) {
    let mut group = c.benchmark_group("writer_chunk");
    let input = vec![0x41u8; MB];
    group.throughput(Throughput::Bytes(MB as u64));

    // Small chunks exercise partial-block buffering, large ones the buffer cap
    for &chunk in &[16usize, 1000, 16 * KB, 256 * KB] {
        group.bench_with_input(
            BenchmarkId::new("chunk", format_size(chunk)),
            &chunk,
            |b, &chunk| {
                b.iter(|| {
                    let mut sink = Vec::with_capacity(MB + 16);
                    let engine = StreamCryptor::encryptor(Algorithm::Aes, KEY, &[]).unwrap();
                    let mut writer = CipherWriter::new(engine, &mut sink);
                    for piece in black_box(&input).chunks(chunk) {
                        writer.write(piece).unwrap();
                    }
                    writer.close().unwrap();
                    drop(writer);
                    black_box(sink);
                });
            },
        );
    }

    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");

    for &size in &[KB, 64 * KB, MB, 10 * MB] {
        let input = vec![0x41u8; size]; // repeating 'A'

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::new("size", format_size(size)),
            &size,
            |b, _| {
                b.iter(|| {
                    // ----- encrypt -------------------------------------------------
                    let mut encrypted = Vec::with_capacity(size + 32);
                    encrypt_stream(Cursor::new(black_box(&input)), &mut encrypted, KEY).unwrap();

                    // ----- decrypt -------------------------------------------------
                    let mut decrypted = Vec::with_capacity(size);
                    decrypt_stream(Cursor::new(&encrypted), &mut decrypted, KEY).unwrap();

                    black_box(decrypted);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_writer_chunking, bench_roundtrip);
criterion_main!(benches);
