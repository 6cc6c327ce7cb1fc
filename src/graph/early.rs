use crate::dsp::early::{EarlyReflections, EarlyReflectionsPolicy};
use crate::graph::message::ControlMessage;
use crate::graph::node::{GraphNode, Parameterized, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/*
Early Reflections Node
======================

The first few tens of milliseconds after a sound are a sparse scatter of
wall, floor and ceiling bounces. They tell the ear how big the room is long
before the dense tail builds up.

This node convolves the input with a velvet-noise sequence (sparse signed
pulses on a jittered grid, decaying to -60 dB over the sequence) and blends
the result with the dry signal. In a full FDN reverb its wet output is what
feeds the delay network.

Parameters
----------

Gain (0.0 - 4.0):
  Level of the reflections. The sequence is energy-normalized, so 1.0 gives
  the same RMS as the input for noise-like signals.

Mix (0.0 - 1.0):
  Dry/wet blend.
  0.0 = all dry, 1.0 = reflections only

The seed, duration and density are fixed when the node is built. Changing
them means building a new node (off the audio thread).

Example usage:

  let early = EarlyReflectionsNode::new(48_000.0, 7, 1.0, 0.35);

  let damped = EarlyReflectionsNode::new(48_000.0, 7, 1.0, 1.0)
      .through(ShelfNode::new(0.9, 0.5, 4_000.0, 48_000.0));
*/

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EarlyParam {
    /// Reflection level (0.0 to 4.0)
    Gain,
    /// Dry/wet mix (0.0 = dry, 1.0 = wet)
    Mix,
}

const MAX_GAIN: f32 = 4.0;

pub struct EarlyReflectionsNode {
    stage: EarlyReflections,
    seed: u32,
    gain: f32,
    mix: f32,
    dry: Vec<f32>,
    wet: Vec<f32>,
}

impl EarlyReflectionsNode {
    /// Build and prepare with the default 30 ms / 2 kHz policy.
    ///
    /// Allocates; build nodes before handing them to the audio thread.
    pub fn new(sample_rate: f32, seed: u32, gain: f32, mix: f32) -> Self {
        Self::with_policy(sample_rate, seed, EarlyReflectionsPolicy::default(), gain, mix)
    }

    pub fn with_policy(
        sample_rate: f32,
        seed: u32,
        policy: EarlyReflectionsPolicy,
        gain: f32,
        mix: f32,
    ) -> Self {
        let mut stage = EarlyReflections::new();
        stage.prepare_with(sample_rate as f64, MAX_BLOCK_SIZE, seed, policy);

        Self {
            stage,
            seed,
            gain: gain.clamp(0.0, MAX_GAIN),
            mix: mix.clamp(0.0, 1.0),
            dry: vec![0.0; MAX_BLOCK_SIZE],
            wet: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Subtle room ambience
    pub fn room(sample_rate: f32, seed: u32) -> Self {
        Self::new(sample_rate, seed, 1.0, 0.25)
    }

    /// Reflections only, for feeding a late-reverb network
    pub fn wet_only(sample_rate: f32, seed: u32) -> Self {
        Self::new(sample_rate, seed, 1.0, 1.0)
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn stage(&self) -> &EarlyReflections {
        &self.stage
    }
}

impl GraphNode for EarlyReflectionsNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        let dry_gain = 1.0 - self.mix;

        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let n = chunk.len();
            let dry = &mut self.dry[..n];
            let wet = &mut self.wet[..n];

            dry.copy_from_slice(chunk);
            self.stage.process(dry, wet, self.gain);

            for ((sample, &d), &w) in chunk.iter_mut().zip(dry.iter()).zip(wet.iter()) {
                *sample = d * dry_gain + w * self.mix;
            }
        }
    }

    /// Clears the reflection history. The sequence is kept.
    fn reset(&mut self) {
        self.stage.convolver_mut().reset();
    }

    fn handle_message(&mut self, message: &ControlMessage) -> bool {
        match *message {
            ControlMessage::Early(param, value) => {
                self.set_param(param, value);
                true
            }
            _ => false,
        }
    }
}

impl Parameterized for EarlyReflectionsNode {
    type Param = EarlyParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            EarlyParam::Gain => self.gain,
            EarlyParam::Mix => self.mix,
        }
    }

    fn set_param(&mut self, param: Self::Param, value: f32) {
        match param {
            EarlyParam::Gain => self.gain = value.clamp(0.0, MAX_GAIN),
            EarlyParam::Mix => self.mix = value.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ctx() -> RenderCtx {
        RenderCtx::new(48_000.0)
    }

    #[test]
    fn test_dry_node_preserves_signal() {
        let mut node = EarlyReflectionsNode::new(48_000.0, 1, 1.0, 0.0);

        let mut buffer = vec![0.5, 0.3, -0.7, 0.1];
        let original = buffer.clone();
        node.render_block(&mut buffer, &test_ctx());

        for (a, b) in buffer.iter().zip(original.iter()) {
            assert!((a - b).abs() < 1e-6, "Dry node should preserve signal");
        }
    }

    #[test]
    fn test_wet_node_renders_reflections() {
        let mut node = EarlyReflectionsNode::wet_only(48_000.0, 1);
        let ir = node.stage().convolver().sequence().impulse_response();

        let mut rendered = Vec::new();
        let mut buffer = vec![0.0; 512];
        buffer[0] = 1.0;
        for _ in 0..3 {
            node.render_block(&mut buffer, &test_ctx());
            rendered.extend_from_slice(&buffer);
            buffer.fill(0.0);
        }

        for (k, &want) in ir.iter().enumerate() {
            assert!((rendered[k] - want).abs() < 1e-6);
        }
        let energy: f32 = rendered.iter().map(|x| x * x).sum();
        assert!((energy - 1.0).abs() < 1e-3, "energy {}", energy);
    }

    #[test]
    fn test_blocks_larger_than_max_are_chunked() {
        let len = MAX_BLOCK_SIZE * 2 + 100;
        let input: Vec<f32> = (0..len).map(|i| (i as f32 * 0.05).sin()).collect();

        let mut big = EarlyReflectionsNode::new(48_000.0, 4, 1.0, 0.5);
        let mut whole = input.clone();
        big.render_block(&mut whole, &test_ctx());

        let mut small = EarlyReflectionsNode::new(48_000.0, 4, 1.0, 0.5);
        let mut pieces = input.clone();
        for chunk in pieces.chunks_mut(300) {
            small.render_block(chunk, &test_ctx());
        }

        for (a, b) in whole.iter().zip(&pieces) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_params_are_clamped() {
        let mut node = EarlyReflectionsNode::room(48_000.0, 1);
        node.set_param(EarlyParam::Mix, 1.7);
        node.set_param(EarlyParam::Gain, -3.0);

        assert_eq!(node.get_param(EarlyParam::Mix), 1.0);
        assert_eq!(node.get_param(EarlyParam::Gain), 0.0);
    }

    #[test]
    fn test_zero_gain_wet_is_silent() {
        let mut node = EarlyReflectionsNode::new(48_000.0, 1, 0.0, 1.0);
        let mut buffer = vec![1.0; 256];
        node.render_block(&mut buffer, &test_ctx());
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_reset_clears_tail() {
        let mut node = EarlyReflectionsNode::wet_only(48_000.0, 1);
        let mut buffer = vec![0.0; 64];
        buffer[0] = 1.0;
        node.render_block(&mut buffer, &test_ctx());

        node.reset();

        let mut tail = vec![0.0; 2048];
        node.render_block(&mut tail, &test_ctx());
        assert!(tail.iter().all(|&s| s == 0.0));
    }
}
