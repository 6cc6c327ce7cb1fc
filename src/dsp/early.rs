//! Early reflections stage: a velvet sequence with a fixed duration/density
//! policy behind a `prepare`/`process`/`reset` contract.

use crate::dsp::convolver::RingConvolver;
use crate::RING_GUARD_SAMPLES;

pub const DEFAULT_DURATION_MS: f32 = 30.0;
pub const DEFAULT_DENSITY_HZ: f32 = 2000.0;

/// Length and pulse density of the early-reflection tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarlyReflectionsPolicy {
    pub duration_ms: f32,
    pub density_hz: f32,
}

impl Default for EarlyReflectionsPolicy {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            density_hz: DEFAULT_DENSITY_HZ,
        }
    }
}

pub struct EarlyReflections {
    convolver: RingConvolver,
    sample_rate: f64,
    max_block_size: usize,
    prepared: bool,
}

impl EarlyReflections {
    pub fn new() -> Self {
        Self {
            convolver: RingConvolver::new(),
            sample_rate: 44_100.0,
            max_block_size: 0,
            prepared: false,
        }
    }

    /// Generate the sequence with the default 30 ms / 2 kHz policy.
    ///
    /// Allocates; call outside the audio callback.
    pub fn prepare(&mut self, sample_rate: f64, max_block_size: usize, seed: u32) {
        self.prepare_with(sample_rate, max_block_size, seed, EarlyReflectionsPolicy::default());
    }

    pub fn prepare_with(
        &mut self,
        sample_rate: f64,
        max_block_size: usize,
        seed: u32,
        policy: EarlyReflectionsPolicy,
    ) {
        // Guard covers the largest block, so its lookback is never overwritten
        let guard = max_block_size.max(RING_GUARD_SAMPLES);
        self.convolver.generate_with_guard(
            sample_rate,
            policy.duration_ms,
            policy.density_hz,
            seed,
            guard,
        );

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.prepared = true;

        let sequence = self.convolver.sequence();
        log::debug!(
            "early reflections prepared: {} pulses over {} samples (grid {}, ring {}, seed {})",
            sequence.len(),
            sequence.sequence_length(),
            sequence.grid_size(),
            self.convolver.capacity(),
            seed
        );
    }

    /// Render the reflections of `input` into `output` (overwritten).
    #[inline]
    pub fn process(&mut self, input: &[f32], output: &mut [f32], gain: f32) {
        self.convolver.convolve(input, output, gain);
    }

    /// No-op: history is only rebuilt by `prepare`.
    pub fn reset(&mut self) {}

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    pub fn convolver(&self) -> &RingConvolver {
        &self.convolver
    }

    pub fn convolver_mut(&mut self) -> &mut RingConvolver {
        &mut self.convolver
    }
}

impl Default for EarlyReflections {
    fn default() -> Self {
        Self::new()
    }
}
