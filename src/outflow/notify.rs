//! Outflow outcome notifications
//!
//! Structured success/failure events for processed outflow requests. The
//! delivery mechanism behind the channel (user notification, alerting) is
//! an external collaborator; the dispatcher only emits.

use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::domain::TransactionType;

/// Terminal outcome of a queued outflow request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutflowOutcome {
    /// The request was admitted; one transaction was persisted.
    Completed {
        transaction_id: Uuid,
        transaction_type: TransactionType,
        amount: Decimal,
    },
    /// The request reached a terminal failure.
    Failed {
        transaction_type: TransactionType,
        reason: String,
        /// True for business rejections, false for infrastructure failures
        rejected: bool,
    },
}

/// Emitting half of the outcome channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: mpsc::UnboundedSender<OutflowOutcome>,
}

impl Notifier {
    /// Create a connected notifier and its consuming half.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OutflowOutcome>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Emit an outcome event. Best-effort: a detached consumer is logged
    /// and the event dropped.
    pub fn notify(&self, outcome: OutflowOutcome) {
        if self.sender.send(outcome).is_err() {
            tracing::warn!("notification consumer detached, dropping outcome event");
        }
    }
}
