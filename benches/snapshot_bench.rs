//! Snapshot reducer and sequence generation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sortlab::sequence::SequenceGenerator;
use sortlab::snapshot::{Snapshot, SnapshotPatch};

fn patch_apply_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_apply");

    for count in [10, 60, 150] {
        let values: Vec<u32> = (0..count).rev().collect();
        let base = Snapshot::new(values.clone());
        let marks = SnapshotPatch::new().comparing([0, 1]).swapping([0, 1]);
        let write = SnapshotPatch::new().values(&values).sorted(0..count as usize / 2);

        group.bench_function(format!("{count}_marks"), |b| {
            b.iter(|| black_box(base.clone().merged(marks.clone())));
        });
        group.bench_function(format!("{count}_values"), |b| {
            b.iter(|| black_box(base.clone().merged(write.clone())));
        });
    }
    group.finish();
}

fn sequence_generation_benchmark(c: &mut Criterion) {
    let mut generator = SequenceGenerator::seeded(7);
    c.bench_function("generate_150", |b| {
        b.iter(|| black_box(generator.generate(black_box(150))));
    });
}

criterion_group!(benches, patch_apply_benchmark, sequence_generation_benchmark);
criterion_main!(benches);
