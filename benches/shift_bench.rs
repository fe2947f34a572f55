// benches/shift_bench.rs
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use shiftbuf::prelude::*;
use std::hint::black_box;

fn bench_write_read_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("steady_state_cycle");

    for size in [256, 1024, 4096, 16384].iter() {
        group.bench_with_input(BenchmarkId::new("bytes", size), size, |b, &size| {
            // Keep the buffer half full so reads leave head space for the
            // compaction heuristic to reclaim.
            let mut buf = ShiftBuffer::with_capacity(size);
            let chunk = vec![0x42u8; size / 4];
            buf.write(&chunk);

            let mut out = vec![0u8; size / 4];
            b.iter(|| {
                buf.write(black_box(&chunk));
                buf.read(black_box(&mut out)).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_growth_from_default(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth");

    group.bench_function("bytes_to_64k", |b| {
        let chunk = [0x42u8; 1024];
        b.iter(|| {
            let mut buf = ShiftBuffer::with_capacity(16);
            for _ in 0..64 {
                buf.write(black_box(&chunk));
            }
            black_box(buf.len())
        });
    });

    group.bench_function("presized_to_64k", |b| {
        let chunk = [0x42u8; 1024];
        b.iter(|| {
            let mut buf = ShiftBuffer::with_capacity(64 * 1024);
            for _ in 0..64 {
                buf.write(black_box(&chunk));
            }
            black_box(buf.len())
        });
    });

    group.finish();
}

fn bench_clone_heavy_elements(c: &mut Criterion) {
    let mut group = c.benchmark_group("element_types");

    group.bench_function("strings_write_read", |b| {
        let items: Vec<String> = (0..32).map(|i| format!("payload-{i:04}")).collect();
        b.iter(|| {
            let mut buf = ShiftBuffer::with_capacity(32);
            buf.write(black_box(&items));
            let mut out: Vec<String> = vec![String::new(); 32];
            buf.read(&mut out).unwrap();
            black_box(out)
        });
    });

    group.bench_function("strings_shove_read", |b| {
        let items: Vec<String> = (0..32).map(|i| format!("payload-{i:04}")).collect();
        b.iter(|| {
            let mut batch = items.clone();
            let mut buf = ShiftBuffer::with_capacity(32);
            buf.shove(&mut batch);
            let mut out: Vec<String> = vec![String::new(); 32];
            buf.read(&mut out).unwrap();
            black_box(out)
        });
    });

    group.finish();
}

fn bench_skip_vs_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("discard");

    group.bench_function("skip_1k", |b| {
        let chunk = [0u8; 1024];
        b.iter(|| {
            let mut buf = ShiftBuffer::with_capacity(1024);
            buf.write(black_box(&chunk));
            buf.skip(1024).unwrap();
        });
    });

    group.bench_function("read_1k", |b| {
        let chunk = [0u8; 1024];
        let mut out = [0u8; 1024];
        b.iter(|| {
            let mut buf = ShiftBuffer::with_capacity(1024);
            buf.write(black_box(&chunk));
            buf.read(black_box(&mut out)).unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_write_read_cycle,
    bench_growth_from_default,
    bench_clone_heavy_elements,
    bench_skip_vs_read
);

criterion_main!(benches);
