//! Composable building blocks for reverb front ends.
//!
//! Graph nodes wrap the low-level DSP primitives with what a host callback
//! needs: in-place block rendering of any length, discrete parameter changes,
//! and a lock-free message path from a control thread.

/// Velvet-noise early reflections with dry/wet mix.
pub mod early;
/// Fluent combinators (`.through()`).
pub mod extensions;
/// Control messages and receivers for cross-thread parameter changes.
pub mod message;
/// Core traits shared by all graph nodes.
pub mod node;
/// Shelving loop-attenuation filter node.
pub mod shelf;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use node::{GraphNode, Parameterized, RenderCtx};
