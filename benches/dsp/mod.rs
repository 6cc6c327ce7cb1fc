//! Benchmarks for low-level DSP primitives.

mod attenuation;
mod convolver;
mod early;

pub use attenuation::bench_attenuation;
pub use convolver::bench_convolver;
pub use early::bench_early;
