//! Criterion benchmarks for ladder-core primitives
//!
//! Run with: cargo bench -p ladder-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ladder_core::{LadderFilter, Lfo, NoiseSource, cutoff_to_hz};

const SAMPLE_RATE: f32 = 44100.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256];

fn bench_ladder_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("LadderFilter");

    for &block_size in BLOCK_SIZES {
        let mut filter = LadderFilter::new();
        let mut noise = NoiseSource::new();
        let input: Vec<f32> = (0..block_size).map(|_| noise.next()).collect();

        group.bench_with_input(
            BenchmarkId::new("static_cutoff", block_size),
            &input,
            |b, input| {
                let hz = cutoff_to_hz(0.6);
                b.iter(|| {
                    let mut sum = 0.0f32;
                    for &x in input {
                        sum += filter.process(x, hz, 0.5, SAMPLE_RATE);
                    }
                    black_box(sum)
                })
            },
        );

        let mut lfo = Lfo::new(SAMPLE_RATE);
        lfo.set_rate(0.6);
        group.bench_with_input(
            BenchmarkId::new("modulated_cutoff", block_size),
            &input,
            |b, input| {
                b.iter(|| {
                    let mut sum = 0.0f32;
                    for &x in input {
                        let hz = cutoff_to_hz(0.5 + 0.3 * lfo.next());
                        sum += filter.process(x, hz, 0.8, SAMPLE_RATE);
                    }
                    black_box(sum)
                })
            },
        );
    }

    group.finish();
}

fn bench_sources(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sources");

    for &block_size in BLOCK_SIZES {
        let mut lfo = Lfo::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("lfo", block_size), &block_size, |b, &n| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for _ in 0..n {
                    sum += lfo.next();
                }
                black_box(sum)
            })
        });

        let mut noise = NoiseSource::new();
        group.bench_with_input(BenchmarkId::new("noise", block_size), &block_size, |b, &n| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for _ in 0..n {
                    sum += noise.next();
                }
                black_box(sum)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ladder_filter, bench_sources);
criterion_main!(benches);
