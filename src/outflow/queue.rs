//! Outflow queue
//!
//! In-process rendition of the external outflow queue: an unbounded channel
//! carrying pending TRANSFER and WITHDRAW intents. Publishing is
//! fire-and-forget; the caller observes no acknowledgment.

use tokio::sync::mpsc;

use crate::domain::OutflowRequest;

/// Publishing half of the outflow queue.
#[derive(Debug, Clone)]
pub struct OutflowQueue {
    sender: mpsc::UnboundedSender<OutflowRequest>,
}

impl OutflowQueue {
    /// Enqueue an outflow request. Fire-and-forget: a closed queue is
    /// logged and the request dropped, nothing is reported to the caller.
    pub fn publish(&self, request: OutflowRequest) {
        if self.sender.send(request).is_err() {
            tracing::warn!("outflow queue closed, dropping request");
        }
    }
}

/// Create a connected queue pair: the publisher handle and the consumer
/// half wired into the dispatcher.
pub fn outflow_channel() -> (OutflowQueue, mpsc::UnboundedReceiver<OutflowRequest>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (OutflowQueue { sender }, receiver)
}
