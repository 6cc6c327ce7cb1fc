#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::graph::early::EarlyParam;
use crate::graph::node::GraphNode;
use crate::graph::shelf::ShelfParam;

/// Parameter changes sent to the audio thread, applied between blocks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlMessage {
    Early(EarlyParam, f32),
    Shelf(ShelfParam, f32),
    /// Clear signal history in every node.
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ControlMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ControlMessage> {
    fn pop(&mut self) -> Option<ControlMessage> {
        Consumer::pop(self).ok()
    }
}

/// Apply every pending message to `node`. Returns how many were consumed.
///
/// Call at the top of the audio callback, before rendering.
pub fn drain_messages<N, R>(node: &mut N, receiver: &mut R) -> usize
where
    N: GraphNode + ?Sized,
    R: MessageReceiver + ?Sized,
{
    let mut consumed = 0;
    while let Some(message) = receiver.pop() {
        let handled = match message {
            ControlMessage::Reset => {
                node.reset();
                true
            }
            other => node.handle_message(&other),
        };
        if handled {
            consumed += 1;
        }
    }
    consumed
}
