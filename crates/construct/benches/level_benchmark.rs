//! Benchmark for level assembly and archive writing.
//!
//! Run with: cargo bench --package construct --bench level_benchmark

use std::io::Cursor;

use construct::{assemble_level, write_archive_to, ArchivePlan, Edition};
use construct_archive::RecordingConsumer;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_assemble_level(c: &mut Criterion) {
    c.bench_function("assemble_level", |b| {
        b.iter(|| {
            let mut consumer = RecordingConsumer::new();
            black_box(assemble_level(&mut consumer, 1, Edition::Cd).unwrap())
        });
    });
}

fn benchmark_write_archive(c: &mut Criterion) {
    let plan = ArchivePlan::default();

    let mut group = c.benchmark_group("archive");
    group.sample_size(20);
    group.bench_function("write_to_memory", |b| {
        b.iter(|| {
            let (cursor, summary) = write_archive_to(Cursor::new(Vec::new()), &plan).unwrap();
            black_box((cursor.into_inner().len(), summary.chunk_count))
        });
    });
    group.finish();
}

criterion_group!(benches, benchmark_assemble_level, benchmark_write_archive);
criterion_main!(benches);
