//! Benchmarks for ipmrs.
//!
//! Run with:
//!     cargo bench

use std::io::Cursor;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use ipmrs::{Codec, Ipm, WhatwgCodec, count_occurrences};

/// Deterministic text of `size` bytes drawn from `alphabet`.
fn text(size: usize, alphabet: &[char]) -> Vec<u8> {
    let mut out = String::with_capacity(size + 4);
    let mut i = 0usize;
    while out.len() < size {
        out.push(alphabet[(i * 7 + 13) % alphabet.len()]);
        i += 1;
    }
    out.into_bytes()
}

fn bench_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("count");

    let ascii: Vec<char> = ('a'..='z').collect();
    let mixed: Vec<char> = "aáčďéěíňóřšťúůýž日本語😀".chars().collect();

    for size in [64 * 1024, 1024 * 1024] {
        for (name, alphabet) in [("ascii", &ascii), ("multibyte", &mixed)] {
            let data = text(size, alphabet);

            group.throughput(Throughput::Bytes(data.len() as u64));
            group.bench_with_input(format!("{}_{}kb", name, size / 1024), &data, |b, data| {
                b.iter(|| {
                    let conversion = WhatwgCodec.open_decoder("UTF-8").unwrap();
                    let table = count_occurrences(Cursor::new(black_box(data)), conversion, 8192).unwrap();
                    black_box(table.total())
                });
            });
        }
    }

    group.finish();
}

fn bench_capacities(c: &mut Criterion) {
    let mut group = c.benchmark_group("capacities");
    let alphabet: Vec<char> = "příliš žluťoučký kůň".chars().collect();
    let data = text(1024 * 1024, &alphabet);
    group.throughput(Throughput::Bytes(data.len() as u64));

    // Small capacities stress the carry path
    for capacity in [7, 64, 4096, 1024 * 1024] {
        group.bench_function(format!("capacity_{}", capacity), |b| {
            b.iter(|| {
                let conversion = WhatwgCodec.open_decoder("UTF-8").unwrap();
                let table = count_occurrences(Cursor::new(black_box(&data)), conversion, capacity).unwrap();
                black_box(table.alphabet_size())
            });
        });
    }

    group.finish();
}

fn bench_reduce(c: &mut Criterion) {
    // Large alphabet with big counts
    let counts: Vec<u64> = (1..=65_536u64).map(|i| i * 1_000 + 1).collect();

    c.bench_function("reduce_64k_alphabet", |b| {
        b.iter(|| {
            let ipm = Ipm::from_counts(black_box(counts.iter().copied())).unwrap();
            black_box(ipm.as_f64())
        });
    });
}

criterion_group!(benches, bench_count, bench_capacities, bench_reduce);
criterion_main!(benches);
