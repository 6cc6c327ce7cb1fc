//! Serializable reverb front-end settings.
//!
//! Descriptors are plain data supplied by a preset or parameter layer. They
//! are validated here, once, before anything is built; the DSP core itself
//! never checks its inputs.

use color_eyre::eyre::{ensure, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::early::{EarlyReflectionsPolicy, DEFAULT_DENSITY_HZ, DEFAULT_DURATION_MS};
use crate::graph::{early::EarlyReflectionsNode, shelf::ShelfNode, through::Through};
use crate::MAX_BLOCK_SIZE;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ReverbPatch {
    pub name: String,
    pub early: EarlyDescriptor,
    pub shelf: ShelfDescriptor,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EarlyDescriptor {
    pub seed: u32,
    pub duration_ms: f32,
    pub density_hz: f32,
    pub gain: f32,
    pub mix: f32,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ShelfDescriptor {
    pub gain_low: f32,
    pub gain_high: f32,
    pub crossover_hz: f32,
}

/// The front end a patch builds: reflections, then the damping shelf.
pub type EarlyChain = Through<EarlyReflectionsNode, ShelfNode>;

impl Default for ReverbPatch {
    fn default() -> Self {
        Self {
            name: "Init".to_string(),
            early: EarlyDescriptor::default(),
            shelf: ShelfDescriptor::default(),
        }
    }
}

impl Default for EarlyDescriptor {
    fn default() -> Self {
        Self {
            seed: 1,
            duration_ms: DEFAULT_DURATION_MS,
            density_hz: DEFAULT_DENSITY_HZ,
            gain: 1.0,
            mix: 0.3,
        }
    }
}

impl Default for ShelfDescriptor {
    fn default() -> Self {
        Self {
            gain_low: 0.9,
            gain_high: 0.6,
            crossover_hz: 4_000.0,
        }
    }
}

impl EarlyDescriptor {
    pub fn policy(&self) -> EarlyReflectionsPolicy {
        EarlyReflectionsPolicy {
            duration_ms: self.duration_ms,
            density_hz: self.density_hz,
        }
    }

    pub fn validate(&self, sample_rate: f32) -> Result<()> {
        ensure!(
            self.duration_ms.is_finite() && self.duration_ms > 0.0,
            "early.duration_ms must be positive, got {}",
            self.duration_ms
        );
        ensure!(
            self.density_hz.is_finite() && self.density_hz > 0.0,
            "early.density_hz must be positive, got {}",
            self.density_hz
        );
        ensure!(
            self.density_hz <= sample_rate,
            "early.density_hz {} exceeds the sample rate {}",
            self.density_hz,
            sample_rate
        );
        ensure!(
            self.gain.is_finite() && (0.0..=4.0).contains(&self.gain),
            "early.gain must be within [0, 4], got {}",
            self.gain
        );
        ensure!(
            self.mix.is_finite() && (0.0..=1.0).contains(&self.mix),
            "early.mix must be within [0, 1], got {}",
            self.mix
        );
        Ok(())
    }
}

impl ShelfDescriptor {
    pub fn validate(&self, sample_rate: f32) -> Result<()> {
        for (field, gain) in [("gain_low", self.gain_low), ("gain_high", self.gain_high)] {
            ensure!(
                gain.is_finite() && (0.0..=1.0).contains(&gain),
                "shelf.{} must be within [0, 1], got {}",
                field,
                gain
            );
        }
        ensure!(
            self.crossover_hz.is_finite()
                && self.crossover_hz > 0.0
                && self.crossover_hz < sample_rate / 2.0,
            "shelf.crossover_hz must be between 0 and Nyquist ({}), got {}",
            sample_rate / 2.0,
            self.crossover_hz
        );
        Ok(())
    }
}

impl ReverbPatch {
    pub fn validate(&self, sample_rate: f32, max_block_size: usize) -> Result<()> {
        ensure!(
            sample_rate.is_finite() && sample_rate > 0.0,
            "sample rate must be positive, got {}",
            sample_rate
        );
        ensure!(
            max_block_size > 0 && max_block_size <= MAX_BLOCK_SIZE,
            "max block size must be within 1..={}, got {}",
            MAX_BLOCK_SIZE,
            max_block_size
        );
        self.early.validate(sample_rate)?;
        self.shelf.validate(sample_rate)?;
        Ok(())
    }

    /// Validate and build the node chain. Allocates.
    pub fn build(&self, sample_rate: f32, max_block_size: usize) -> Result<EarlyChain> {
        self.validate(sample_rate, max_block_size)?;

        log::info!(
            "building patch '{}' at {} Hz (seed {}, {} ms, {} Hz density)",
            self.name,
            sample_rate,
            self.early.seed,
            self.early.duration_ms,
            self.early.density_hz
        );

        let early = EarlyReflectionsNode::with_policy(
            sample_rate,
            self.early.seed,
            self.early.policy(),
            self.early.gain,
            self.early.mix,
        );
        let shelf = ShelfNode::new(
            self.shelf.gain_low,
            self.shelf.gain_high,
            self.shelf.crossover_hz,
            sample_rate,
        );
        Ok(Through::new(early, shelf))
    }
}
