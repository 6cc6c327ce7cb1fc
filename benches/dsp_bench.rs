//! Benchmarks for the early reflection and attenuation primitives.
//!
//! Run with: cargo bench
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/convolver    Sparse ring-buffer convolution at several densities
//!   - dsp/early        Early reflections stage (default policy)
//!   - dsp/attenuation  Shelving filter, one and sixteen delay lines

use criterion::{criterion_group, criterion_main};

mod dsp;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

/// Test signal: a short impulse followed by a quiet sine tail.
pub fn test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            if i < 10 {
                1.0 - (i as f32 / 10.0)
            } else {
                (i as f32 * 0.05).sin() * 0.1
            }
        })
        .collect()
}

criterion_group!(
    benches,
    dsp::bench_convolver,
    dsp::bench_early,
    dsp::bench_attenuation,
);
criterion_main!(benches);
