use crate::graph::message::ControlMessage;
use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Signal Chain (Through)
=============================

Through connects two nodes in series: the first processes the buffer in
place, then the second processes the result.

  [Source] ──→ [Effect] ──→ output

Typical reverb front end:

  let front = EarlyReflectionsNode::wet_only(48_000.0, 1)
      .through(ShelfNode::dark(48_000.0));

Control messages are offered to both sides; each node only consumes the
messages addressed to its own parameter type.
*/

pub struct Through<S, F> {
    source: S,
    effect: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, effect: F) -> Self {
        Self { source, effect }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn effect(&self) -> &F {
        &self.effect
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn effect_mut(&mut self) -> &mut F {
        &mut self.effect
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.effect.render_block(out, ctx);
    }

    fn reset(&mut self) {
        self.source.reset();
        self.effect.reset();
    }

    fn handle_message(&mut self, message: &ControlMessage) -> bool {
        // Non-short-circuiting: both sides see every message
        self.source.handle_message(message) | self.effect.handle_message(message)
    }
}
