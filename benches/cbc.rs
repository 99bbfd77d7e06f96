//! Benchmarks for the component-by-component search hot path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use latsearch::kernel::PAlpha;
use latsearch::search::{CbcSearch, SearchConfig};
use latsearch::storage::Compression;
use latsearch::weights::{ProductWeights, Weights};
use latsearch::SizeParam;

fn bench_cbc_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("cbc_size");

    // Vary the number of points with fixed dimension
    let kernel = PAlpha::new(2).unwrap();
    let weights = Weights::Product(ProductWeights::uniform(0.7));

    for n in [257u64, 1021, 4093, 16381] {
        group.bench_with_input(BenchmarkId::new("points", n), &n, |b, &n| {
            b.iter(|| {
                let config = SearchConfig::new(8)
                    .unwrap()
                    .with_compression(Compression::Symmetric);
                let mut search = CbcSearch::new(
                    SizeParam::ordinary(black_box(n)).unwrap(),
                    &kernel,
                    &weights,
                    config,
                )
                .unwrap();
                search.run().unwrap()
            })
        });
    }

    group.finish();
}

fn bench_cbc_dimension(c: &mut Criterion) {
    let mut group = c.benchmark_group("cbc_dimension");

    // Fixed size, vary dimension
    let kernel = PAlpha::new(2).unwrap();
    let weights = Weights::Product(ProductWeights::uniform(0.7));
    let n = 2039u64;

    for dimension in [2usize, 4, 8, 16] {
        group.bench_with_input(
            BenchmarkId::new("dimension", dimension),
            &dimension,
            |b, &dimension| {
                b.iter(|| {
                    let config = SearchConfig::new(dimension)
                        .unwrap()
                        .with_compression(Compression::Symmetric);
                    let mut search = CbcSearch::new(
                        SizeParam::ordinary(n).unwrap(),
                        &kernel,
                        &weights,
                        config,
                    )
                    .unwrap();
                    search.run().unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_cbc_compression(c: &mut Criterion) {
    let mut group = c.benchmark_group("cbc_compression");

    // Symmetric compression should roughly halve the scan cost
    let kernel = PAlpha::new(2).unwrap();
    let weights = Weights::Product(ProductWeights::uniform(0.7));
    let n = 4093u64;

    for (name, compression) in [
        ("none", Compression::None),
        ("symmetric", Compression::Symmetric),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let config = SearchConfig::new(6).unwrap().with_compression(compression);
                let mut search = CbcSearch::new(
                    SizeParam::ordinary(black_box(n)).unwrap(),
                    &kernel,
                    &weights,
                    config,
                )
                .unwrap();
                search.run().unwrap()
            })
        });
    }

    group.finish();
}

fn bench_cbc_embedded(c: &mut Criterion) {
    let mut group = c.benchmark_group("cbc_embedded");

    let kernel = PAlpha::new(2).unwrap();
    let weights = Weights::Product(ProductWeights::uniform(0.7));

    for max_level in [8u32, 10, 12] {
        group.bench_with_input(
            BenchmarkId::new("max_level", max_level),
            &max_level,
            |b, &max_level| {
                b.iter(|| {
                    let config = SearchConfig::new(6)
                        .unwrap()
                        .with_compression(Compression::Symmetric);
                    let mut search = CbcSearch::new(
                        SizeParam::embedded(2, black_box(max_level)).unwrap(),
                        &kernel,
                        &weights,
                        config,
                    )
                    .unwrap();
                    search.run().unwrap()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_cbc_size,
    bench_cbc_dimension,
    bench_cbc_compression,
    bench_cbc_embedded
);
criterion_main!(benches);
