//! Sparse convolution against a velvet sequence through a ring buffer.
//!
//! ```text
//!            write_pos (before block)
//!                 │
//! ring:  [ . . . ][x0 x1 x2 ... xN-1][ . . . ]
//!                 ▲
//!   read = write_pos + n - pulse.position   (mod capacity)
//! ```
//!
//! Each block is written into the history first, then every pulse reads back
//! `pulse.position` samples behind each output index. Pulses that reach
//! further back than the current block read earlier blocks from the ring, so
//! the result is identical to a convolution over the continuous stream no
//! matter how it was cut into blocks.
//!
//! Cost is `O(pulses × block)`. A 30 ms sequence at 2 kHz density has ~60
//! pulses, against ~1440 taps for a dense FIR of the same length.

use crate::dsp::velvet::VelvetSequence;
use crate::RING_GUARD_SAMPLES;

/// Pulses whose scaled weight falls below this are skipped.
const CULL_THRESHOLD: f32 = 1.0e-10;

pub struct RingConvolver {
    sequence: VelvetSequence,
    ring: Vec<f32>,
    write_pos: usize,
}

impl RingConvolver {
    /// Unprepared convolver; produces silence until `generate` is called.
    pub fn new() -> Self {
        Self {
            sequence: VelvetSequence::default(),
            ring: Vec::new(),
            write_pos: 0,
        }
    }

    /// Build the pulse table and allocate the history ring.
    ///
    /// Allocates. Call off the audio thread.
    pub fn generate(&mut self, sample_rate: f64, duration_ms: f32, density: f32, seed: u32) {
        self.generate_with_guard(sample_rate, duration_ms, density, seed, RING_GUARD_SAMPLES);
    }

    /// Like `generate`, with a guard region sized for blocks larger than
    /// `RING_GUARD_SAMPLES`.
    pub fn generate_with_guard(
        &mut self,
        sample_rate: f64,
        duration_ms: f32,
        density: f32,
        seed: u32,
        guard: usize,
    ) {
        self.sequence = VelvetSequence::generate(sample_rate, duration_ms, density, seed);

        let capacity = self.sequence.sequence_length() + guard.max(RING_GUARD_SAMPLES);
        self.ring.clear();
        self.ring.resize(capacity, 0.0);
        self.write_pos = 0;
    }

    /// Convolve `input` with the sequence into `output`.
    ///
    /// Processes `min(input.len(), output.len())` samples; `output` is
    /// overwritten, not accumulated into. The block must not exceed
    /// `capacity()`.
    pub fn convolve(&mut self, input: &[f32], output: &mut [f32], gain: f32) {
        let num_samples = input.len().min(output.len());
        let output = &mut output[..num_samples];
        output.fill(0.0);

        let capacity = self.ring.len();
        if capacity == 0 {
            return;
        }
        debug_assert!(
            num_samples <= capacity,
            "block of {} samples exceeds ring capacity {}",
            num_samples,
            capacity
        );

        // History must contain this block before any pulse reads it
        let start = self.write_pos;
        let mut wp = start;
        for &sample in &input[..num_samples] {
            self.ring[wp] = sample;
            wp += 1;
            if wp == capacity {
                wp = 0;
            }
        }

        let norm_gain = self.sequence.norm_gain();
        for (pulse, &env) in self.sequence.pulses().iter().zip(self.sequence.envelopes()) {
            let coeff = pulse.sign * gain * env * norm_gain;
            if coeff.abs() < CULL_THRESHOLD {
                continue;
            }

            // position < sequence_length < capacity, so adding capacity keeps
            // the offset non-negative
            let mut read = (start + capacity - pulse.position) % capacity;
            for out in output.iter_mut() {
                *out += coeff * self.ring[read];
                read += 1;
                if read == capacity {
                    read = 0;
                }
            }
        }

        self.write_pos = wp;
    }

    /// Clear history and rewind the write cursor. The sequence is kept.
    pub fn reset(&mut self) {
        self.ring.fill(0.0);
        self.write_pos = 0;
    }

    pub fn sequence(&self) -> &VelvetSequence {
        &self.sequence
    }

    /// Ring length in samples (`sequence_length + guard`).
    pub fn capacity(&self) -> usize {
        self.ring.len()
    }

    pub fn write_position(&self) -> usize {
        self.write_pos
    }
}

impl Default for RingConvolver {
    fn default() -> Self {
        Self::new()
    }
}
