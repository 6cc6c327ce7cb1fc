use crate::graph::message::ControlMessage;

/// Context passed to graph nodes during rendering
pub struct RenderCtx {
    pub sample_rate: f32,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self { sample_rate }
    }
}

/// Nodes whose parameters can be changed between blocks.
///
/// Values take effect from the next rendered sample; there is no smoothing.
/// Out-of-range values are clamped.
pub trait Parameterized: Send {
    type Param: Copy + Send;

    fn get_param(&self, param: Self::Param) -> f32;

    fn set_param(&mut self, param: Self::Param, value: f32);
}

/// Core trait for block-based audio processing nodes
pub trait GraphNode: Send {
    /// Process `out` in place.
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Clear signal history. Parameters are kept.
    ///
    /// Default implementation does nothing (stateless nodes).
    fn reset(&mut self) {}

    /// Apply a control message addressed to this node.
    ///
    /// Returns `true` if the message was consumed.
    fn handle_message(&mut self, _message: &ControlMessage) -> bool {
        false
    }
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn handle_message(&mut self, message: &ControlMessage) -> bool {
        (**self).handle_message(message)
    }
}
