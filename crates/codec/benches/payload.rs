//! Benchmarks for payload encodings.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use filekit_codec::{base64_decode_strict, base64_encode, decode_hex, encode_hex, unwrap, wrap};

fn generate_test_data(size: usize) -> Vec<u8> {
    // Binary-looking data that covers every byte value
    (0..size).map(|i| (i * 31 % 256) as u8).collect()
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");

    for size in [1024, 10240, 102400].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("hex", size), &data, |b, data| {
            b.iter(|| encode_hex(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("base64_chunked", size), &data, |b, data| {
            b.iter(|| base64_encode(black_box(data), true))
        });
    }

    group.finish();
}

fn bench_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoding");

    for size in [1024, 10240, 102400].iter() {
        let data = generate_test_data(*size);
        let hex = encode_hex(&data);
        let chunked = base64_encode(&data, true);
        let wrapped = wrap("data", "application/octet-stream", &data);

        group.bench_with_input(BenchmarkId::new("hex", size), &hex, |b, hex| {
            b.iter(|| decode_hex(black_box(hex)))
        });

        group.bench_with_input(BenchmarkId::new("base64_chunked", size), &chunked, |b, chunked| {
            b.iter(|| base64_decode_strict(black_box(chunked)))
        });

        group.bench_with_input(BenchmarkId::new("unwrap_probe", size), &wrapped, |b, wrapped| {
            b.iter(|| unwrap(black_box(wrapped)).is_some())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encoding, bench_decoding);
criterion_main!(benches);
