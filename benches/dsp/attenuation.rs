//! Benchmarks for the shelving attenuation filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use velvet_reverb::dsp::attenuation::AttenuationFilter;

use crate::{test_signal, BLOCK_SIZES};

/// Delay lines in a typical FDN
const LINES: usize = 16;

pub fn bench_attenuation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/attenuation");

    for &size in BLOCK_SIZES {
        let input = test_signal(size);

        // Single line, block render
        let mut filter = AttenuationFilter::new();
        filter.set_coefficients(0.95, 0.6, 4_000.0, 48_000.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("single", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        // Per-sample across a bank, as an FDN feedback loop runs it
        let mut bank: Vec<AttenuationFilter> = (0..LINES)
            .map(|i| {
                let mut f = AttenuationFilter::new();
                f.set_decay(1_000 + i * 137, 2.0, 0.7, 3_000.0, 48_000.0);
                f
            })
            .collect();
        group.bench_with_input(BenchmarkId::new("bank_16", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &x in &input {
                    for filter in bank.iter_mut() {
                        sum += filter.process(black_box(x));
                    }
                }
                sum
            })
        });
    }

    group.finish();
}
