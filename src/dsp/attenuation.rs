//! Attenuation Filter - Frequency-Dependent Loop Gain
//!
//! In a feedback delay network, every pass around a delay line multiplies the
//! signal by the loop gain. A scalar gain gives one RT60 for the whole
//! spectrum; real rooms lose highs faster than lows. Placing this filter after
//! each delay line gives two independently controlled decay rates.
//!
//! # First-Order Shelf
//!
//! ```text
//!         b0 + b1·z⁻¹
//! H(z) = ─────────────
//!          1 + a1·z⁻¹
//! ```
//!
//! Constrained so that:
//!
//! - `H(1)  = gain_low`   (DC)
//! - `H(-1) = gain_high`  (Nyquist)
//!
//! The pole comes from the bilinear-transform prewarp of the crossover:
//!
//! ```text
//! t  = tan(π · crossover / sample_rate)
//! a1 = (t - 1) / (t + 1)
//! b0 = (gain_low·(1 + a1) + gain_high·(1 - a1)) / 2
//! b1 = (gain_low·(1 + a1) - gain_high·(1 - a1)) / 2
//! ```
//!
//! When both gains are equal the section collapses to a plain gain.

use std::f32::consts::PI;

/// Gains closer than this are treated as equal.
const FLAT_TOLERANCE: f32 = 1.0e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShelfCoefficients {
    pub b0: f32,
    pub b1: f32,
    pub a1: f32,
}

impl ShelfCoefficients {
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        a1: 0.0,
    };

    /// Solve for the shelf hitting `gain_low` at DC and `gain_high` at Nyquist.
    pub fn design(gain_low: f32, gain_high: f32, crossover_hz: f32, sample_rate: f32) -> Self {
        if (gain_low - gain_high).abs() < FLAT_TOLERANCE {
            return Self {
                b0: gain_low,
                b1: 0.0,
                a1: 0.0,
            };
        }

        let t = (PI * crossover_hz / sample_rate).tan();
        let a1 = (t - 1.0) / (t + 1.0);

        Self {
            b0: (gain_low * (1.0 + a1) + gain_high * (1.0 - a1)) * 0.5,
            b1: (gain_low * (1.0 + a1) - gain_high * (1.0 - a1)) * 0.5,
            a1,
        }
    }
}

/// Per-pass loop gain that decays a delay line by 60 dB in `rt60_s` seconds.
///
/// `10^(-3 · delay / (rt60 · sample_rate))`. Non-positive RT60 gives 0.
pub fn loop_gain_for_rt60(delay_samples: usize, rt60_s: f32, sample_rate: f32) -> f32 {
    if rt60_s <= 0.0 || sample_rate <= 0.0 {
        return 0.0;
    }
    10.0f32.powf(-3.0 * delay_samples as f32 / (rt60_s * sample_rate))
}

/// One-pole/one-zero shelving attenuation, one instance per delay line.
pub struct AttenuationFilter {
    coeffs: ShelfCoefficients,
    z1: f32,     // last input
    z_out1: f32, // last output
}

impl AttenuationFilter {
    /// Unity pass-through until coefficients are set.
    pub fn new() -> Self {
        Self {
            coeffs: ShelfCoefficients::IDENTITY,
            z1: 0.0,
            z_out1: 0.0,
        }
    }

    pub fn set_coefficients(
        &mut self,
        gain_low: f32,
        gain_high: f32,
        crossover_hz: f32,
        sample_rate: f32,
    ) {
        self.coeffs = ShelfCoefficients::design(gain_low, gain_high, crossover_hz, sample_rate);
    }

    /// Design from RT60 targets for a delay line of `delay_samples`.
    pub fn set_decay(
        &mut self,
        delay_samples: usize,
        rt60_low: f32,
        rt60_high: f32,
        crossover_hz: f32,
        sample_rate: f32,
    ) {
        let gain_low = loop_gain_for_rt60(delay_samples, rt60_low, sample_rate);
        let gain_high = loop_gain_for_rt60(delay_samples, rt60_high, sample_rate);
        self.set_coefficients(gain_low, gain_high, crossover_hz, sample_rate);
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let ShelfCoefficients { b0, b1, a1 } = self.coeffs;
        let output = b0 * input + b1 * self.z1 - a1 * self.z_out1;
        self.z1 = input;
        self.z_out1 = output;
        output
    }

    /// Filter a block in place.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Zero the delay registers. Coefficients are kept.
    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z_out1 = 0.0;
    }

    pub fn coefficients(&self) -> ShelfCoefficients {
        self.coeffs
    }

    /// Magnitude response `|H(e^jω)|` at `freq_hz`.
    pub fn magnitude_at(&self, freq_hz: f32, sample_rate: f32) -> f32 {
        let ShelfCoefficients { b0, b1, a1 } = self.coeffs;
        let w = 2.0 * PI * freq_hz / sample_rate;
        let (s, c) = w.sin_cos();

        // e^-jω = cos ω - j sin ω
        let num_re = b0 + b1 * c;
        let num_im = -b1 * s;
        let den_re = 1.0 + a1 * c;
        let den_im = -a1 * s;

        ((num_re * num_re + num_im * num_im) / (den_re * den_re + den_im * den_im)).sqrt()
    }
}

impl Default for AttenuationFilter {
    fn default() -> Self {
        Self::new()
    }
}
