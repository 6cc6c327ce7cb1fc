//! Velvet Noise - Sparse Pulse Sequences for Early Reflections
//!
//! Velvet noise is a train of signed unit impulses placed at irregular
//! positions. Convolving with it sounds like convolving with white noise, but
//! only a few percent of the samples are non-zero, so the convolution is cheap.
//!
//! # Jittered Grid
//!
//! ```text
//! grid:    |       |       |       |       |
//! pulses:    +1        -1   +1         -1
//!          m=0     m=1     m=2     m=3
//! ```
//!
//! The sequence is split into cells of `grid_size` samples. Each cell gets
//! exactly one pulse at a random offset inside the cell, with a random sign.
//! The irregular spacing avoids the metallic comb coloration of a uniform
//! impulse train.
//!
//! # Envelope
//!
//! Pulses are weighted by an exponential decay that reaches -60 dB at the end
//! of the sequence, then the whole table is scaled by `norm_gain` so that the
//! summed pulse energy is 1. Density and duration can therefore be tuned
//! without any makeup gain.

/// Linear congruential generator (Numerical Recipes constants).
///
/// The exact stream matters: pulse tables must be reproducible bit-for-bit
/// from a seed.
#[derive(Debug, Clone, Copy)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub const MULTIPLIER: u32 = 1_664_525;
    pub const INCREMENT: u32 = 1_013_904_223;

    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the recurrence and return the new state.
    #[inline]
    pub fn next_word(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        self.state
    }
}

/// A single signed impulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    /// Delay in samples from the start of the sequence.
    pub position: usize,
    /// Either `1.0` or `-1.0`.
    pub sign: f32,
}

/// Pulse table plus its decay envelope and energy normalization.
#[derive(Debug, Clone)]
pub struct VelvetSequence {
    pulses: Vec<Pulse>,
    envelopes: Vec<f32>,
    sequence_length: usize,
    grid_size: usize,
    decay_rate: f64,
    norm_gain: f32,
}

impl Default for VelvetSequence {
    fn default() -> Self {
        Self {
            pulses: Vec::new(),
            envelopes: Vec::new(),
            sequence_length: 0,
            grid_size: 1,
            decay_rate: 0.0,
            norm_gain: 1.0,
        }
    }
}

impl VelvetSequence {
    /// Derive a pulse sequence from a seed.
    ///
    /// - `duration_ms`: temporal support of the sequence
    /// - `density`: pulses per second (one per grid cell)
    ///
    /// Inputs are assumed finite and non-negative; validation belongs to the
    /// caller (see `patch`).
    pub fn generate(sample_rate: f64, duration_ms: f32, density: f32, seed: u32) -> Self {
        let sequence_length = (sample_rate * duration_ms as f64 / 1000.0).round() as usize;
        let grid_size = ((sample_rate / density as f64).round() as usize).max(1);
        let num_pulses = sequence_length / grid_size;

        let mut pulses = Vec::with_capacity(num_pulses);
        let mut rng = Lcg::new(seed);

        for m in 0..num_pulses {
            // Jitter first, then sign
            let jitter = rng.next_word() % grid_size as u32;
            let position = m * grid_size + jitter as usize;

            let sign = if rng.next_word() & 0x8000_0000 != 0 {
                -1.0
            } else {
                1.0
            };

            if position < sequence_length {
                pulses.push(Pulse { position, sign });
            }
        }

        // -60 dB at sequence_length
        let decay_rate = -3.0 * std::f64::consts::LN_10 / (sequence_length.max(1) as f64);

        let mut energy = 0.0f64;
        let envelopes: Vec<f32> = pulses
            .iter()
            .map(|pulse| {
                let env = (decay_rate * pulse.position as f64).exp();
                energy += env * env;
                env as f32
            })
            .collect();

        let norm_gain = if energy > 1.0e-6 {
            (1.0 / energy.sqrt()) as f32
        } else {
            1.0
        };

        Self {
            pulses,
            envelopes,
            sequence_length,
            grid_size,
            decay_rate,
            norm_gain,
        }
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    /// Decay weight per pulse, parallel to `pulses()`.
    pub fn envelopes(&self) -> &[f32] {
        &self.envelopes
    }

    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Exponential decay per sample (natural log units, negative).
    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    pub fn norm_gain(&self) -> f32 {
        self.norm_gain
    }

    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Dense impulse response at unity gain.
    ///
    /// Allocates; meant for analysis and display, not for the audio thread.
    pub fn impulse_response(&self) -> Vec<f32> {
        let mut ir = vec![0.0; self.sequence_length];
        for (pulse, &env) in self.pulses.iter().zip(&self.envelopes) {
            ir[pulse.position] += pulse.sign * env * self.norm_gain;
        }
        ir
    }
}
