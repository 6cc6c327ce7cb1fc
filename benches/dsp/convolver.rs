//! Benchmarks for sparse convolution.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use velvet_reverb::dsp::convolver::RingConvolver;

use crate::{test_signal, BLOCK_SIZES};

pub fn bench_convolver(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/convolver");

    let sample_rate = 48_000.0;

    // (label, duration ms, density Hz)
    let shapes = [
        ("sparse_30ms", 30.0, 1000.0),
        ("default_30ms", 30.0, 2000.0),
        ("dense_80ms", 80.0, 4000.0),
    ];

    for &size in BLOCK_SIZES {
        let input = test_signal(size);
        let mut output = vec![0.0f32; size];

        for &(label, duration_ms, density) in &shapes {
            let mut conv = RingConvolver::new();
            conv.generate(sample_rate, duration_ms, density, 1);

            group.bench_with_input(BenchmarkId::new(label, size), &size, |b, _| {
                b.iter(|| {
                    conv.convolve(black_box(&input), black_box(&mut output), 1.0);
                })
            });
        }
    }

    group.finish();
}
