use crate::dsp::attenuation::AttenuationFilter;
use crate::graph::message::ControlMessage;
use crate::graph::node::{GraphNode, Parameterized, RenderCtx};

/*
Shelf Node
==========

Wraps the first-order attenuation shelf so it can sit in a node chain. Inside
an FDN the same filter runs once per delay line on the feedback path; as a
node it is handy for darkening the early reflections before they feed the
network, and for auditioning a loop-gain design.

Parameters
----------

GainLow (0.0 - 1.0):   gain at DC
GainHigh (0.0 - 1.0):  gain at Nyquist
Crossover (Hz):        transition frequency, 20 Hz to just under Nyquist

Equal gains collapse the section to a flat gain with no phase shift.
Coefficients are recomputed once per parameter change, never per sample.
*/

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShelfParam {
    GainLow,
    GainHigh,
    Crossover,
}

const MIN_CROSSOVER_HZ: f32 = 20.0;

pub struct ShelfNode {
    filter: AttenuationFilter,
    gain_low: f32,
    gain_high: f32,
    crossover_hz: f32,
    sample_rate: f32,
}

impl ShelfNode {
    pub fn new(gain_low: f32, gain_high: f32, crossover_hz: f32, sample_rate: f32) -> Self {
        let mut node = Self {
            filter: AttenuationFilter::new(),
            gain_low: gain_low.clamp(0.0, 1.0),
            gain_high: gain_high.clamp(0.0, 1.0),
            crossover_hz: clamp_crossover(crossover_hz, sample_rate),
            sample_rate,
        };
        node.update_coefficients();
        node
    }

    /// Gentle high-frequency loss
    pub fn dark(sample_rate: f32) -> Self {
        Self::new(1.0, 0.5, 3_000.0, sample_rate)
    }

    pub fn filter(&self) -> &AttenuationFilter {
        &self.filter
    }

    fn update_coefficients(&mut self) {
        self.filter.set_coefficients(
            self.gain_low,
            self.gain_high,
            self.crossover_hz,
            self.sample_rate,
        );
    }
}

fn clamp_crossover(freq: f32, sample_rate: f32) -> f32 {
    freq.clamp(MIN_CROSSOVER_HZ, (sample_rate * 0.49).max(MIN_CROSSOVER_HZ))
}

impl GraphNode for ShelfNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.filter.render(out);
    }

    fn reset(&mut self) {
        self.filter.reset();
    }

    fn handle_message(&mut self, message: &ControlMessage) -> bool {
        match *message {
            ControlMessage::Shelf(param, value) => {
                self.set_param(param, value);
                true
            }
            _ => false,
        }
    }
}

impl Parameterized for ShelfNode {
    type Param = ShelfParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            ShelfParam::GainLow => self.gain_low,
            ShelfParam::GainHigh => self.gain_high,
            ShelfParam::Crossover => self.crossover_hz,
        }
    }

    fn set_param(&mut self, param: Self::Param, value: f32) {
        match param {
            ShelfParam::GainLow => self.gain_low = value.clamp(0.0, 1.0),
            ShelfParam::GainHigh => self.gain_high = value.clamp(0.0, 1.0),
            ShelfParam::Crossover => {
                self.crossover_hz = clamp_crossover(value, self.sample_rate)
            }
        }
        self.update_coefficients();
    }
}
