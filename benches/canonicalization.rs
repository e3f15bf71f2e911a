//! Performance benchmarks for canonical reduction and bulk enumeration.
//!
//! Run with: `cargo bench --bench canonicalization`
//!
//! The canonical scan is linear in the action range, so the volume sweep
//! should show the quadratic growth of volume times dihedral group order.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use orbit_kernel::{
    enumerate_and_insert, AllOccupationsSource, CanonicalCache, Cell, Config, EnumerationBatch,
    EnumerationOptions, InMemoryStore, NoOpProgress, OccEnumInput,
};

/// A primitive configuration with no special symmetry, scaled to `volume`.
fn make_config(volume: usize) -> Config {
    let mut occupation: Vec<u8> = (0..volume).map(|site| (site % 3) as u8).collect();
    occupation[0] = 2;
    Config::new(Cell::of_volume(volume), occupation)
}

/// Benchmark the canonical-form scan across cell volumes.
fn bench_canonical_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical_form");

    for volume in [4, 8, 16, 32] {
        let config = make_config(volume);

        group.throughput(Throughput::Elements(2 * volume as u64));
        group.bench_with_input(
            BenchmarkId::new("volume", volume),
            &config,
            |b, config| {
                b.iter(|| black_box(config).canonical_form().unwrap())
            },
        );
    }

    group.finish();
}

/// Benchmark the full reduction (representative plus mapping actions).
fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");

    for volume in [4, 8, 16, 32] {
        let config = make_config(volume);

        group.bench_with_input(BenchmarkId::new("volume", volume), &config, |b, config| {
            b.iter(|| black_box(config).reduce().unwrap())
        });
    }

    group.finish();
}

/// Benchmark memoized reduction on a hot key.
fn bench_cached_canonical_record(c: &mut Criterion) {
    let cache = CanonicalCache::new(1024);
    let config = make_config(16);

    // Warm the cache.
    cache
        .get_or_compute(&config, || config.primitive().canonical_record())
        .unwrap();

    c.bench_function("cached_canonical_record", |b| {
        b.iter(|| {
            cache
                .get_or_compute(black_box(&config), || {
                    config.primitive().canonical_record()
                })
                .unwrap()
        })
    });
}

/// Benchmark a whole enumeration run over one cell.
fn bench_enumeration_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumeration_run");
    group.sample_size(20);

    for volume in [4, 6] {
        let input = OccEnumInput::new(Cell::of_volume(volume), 2);
        let batches = vec![EnumerationBatch::new("bench", input)];

        group.throughput(Throughput::Elements(1u64 << volume));
        group.bench_with_input(
            BenchmarkId::new("volume", volume),
            &batches,
            |b, batches| {
                b.iter(|| {
                    let mut cell_store = InMemoryStore::new();
                    let mut object_store = InMemoryStore::new();
                    let mut progress = NoOpProgress;
                    let options = EnumerationOptions::new("bench_enum").dry_run(true);
                    enumerate_and_insert(
                        &options,
                        |_name: &str, input: &OccEnumInput| AllOccupationsSource::new(input),
                        batches,
                        &mut cell_store,
                        &mut object_store,
                        &mut progress,
                    )
                    .unwrap()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_canonical_form,
    bench_reduce,
    bench_cached_canonical_record,
    bench_enumeration_run,
);
criterion_main!(benches);
