// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wavebench_core::{codec, dwt, signal, Wavelet};

const SIZES: &[usize] = &[1_024, 16_384, 131_072];
const WAVELETS: &[&str] = &["db2", "db4"];

fn input(size: usize) -> Vec<f64> {
    signal::test_signal(size, &mut StdRng::seed_from_u64(size as u64))
}

fn bench_wavedec(c: &mut Criterion) {
    let mut group = c.benchmark_group("wavedec");
    for name in WAVELETS {
        let wavelet = Wavelet::from_name(name).expect("known wavelet");
        for &size in SIZES {
            let data = input(size);
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::new(*name, size), &data, |b, data| {
                b.iter(|| black_box(dwt::wavedec(black_box(data), &wavelet, None)))
            });
        }
    }
    group.finish();
}

fn bench_waverec(c: &mut Criterion) {
    let mut group = c.benchmark_group("waverec");
    for name in WAVELETS {
        let wavelet = Wavelet::from_name(name).expect("known wavelet");
        for &size in SIZES {
            let coeffs = dwt::wavedec(&input(size), &wavelet, None).expect("decomposes");
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::new(*name, size), &coeffs, |b, coeffs| {
                b.iter(|| black_box(dwt::waverec(black_box(coeffs), &wavelet, size)))
            });
        }
    }
    group.finish();
}

// Marshalling cost alone, the overhead the per-call sandbox backend pays.
fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    for &size in SIZES {
        let data = input(size);
        group.throughput(Throughput::Bytes((size * 8) as u64));
        group.bench_with_input(BenchmarkId::new("signal", size), &data, |b, data| {
            b.iter(|| black_box(codec::Value::decode(codec::encode_signal(black_box(data)))))
        });
    }
    group.finish();
}

criterion_group!(transforms, bench_wavedec, bench_waverec);
criterion_group!(marshalling, bench_codec);
criterion_main!(transforms, marshalling);
