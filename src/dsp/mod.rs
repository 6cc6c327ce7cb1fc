//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! Everything here is realtime-safe once prepared: `convolve`, `process` and
//! `render` never allocate or lock. Preparation (`generate`, `prepare`) sizes
//! all tables and buffers up front and belongs outside the audio callback.

/// First-order shelving filter for per-band loop attenuation.
pub mod attenuation;
/// Sparse ring-buffer convolution against a velvet sequence.
pub mod convolver;
/// Early reflections stage with a fixed duration/density policy.
pub mod early;
/// Deterministic velvet-noise pulse sequences.
pub mod velvet;

pub use attenuation::{AttenuationFilter, ShelfCoefficients};
pub use convolver::RingConvolver;
pub use early::{EarlyReflections, EarlyReflectionsPolicy};
pub use velvet::{Pulse, VelvetSequence};
