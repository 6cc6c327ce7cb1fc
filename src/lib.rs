pub mod dsp;
pub mod graph; // Block-rendering nodes and control messages
pub mod patch; // Serializable configuration

/// Largest block a graph node renders in one inner call.
pub const MAX_BLOCK_SIZE: usize = 2048;
/// Minimum headroom past the sequence length in the convolution ring.
pub const RING_GUARD_SAMPLES: usize = 256;
