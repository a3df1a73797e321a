//! Outflow dispatcher
//!
//! Consumes queued outflow requests and drives each to a terminal state.
//! This is the catch-all boundary of the queue path: every failure is
//! logged and converted into a structured outcome event, and the message
//! counts as consumed regardless of outcome. Nothing propagates back to
//! the queue transport.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::OutflowRequest;
use crate::ledger::LedgerService;
use crate::store::LedgerStore;

use super::notify::{Notifier, OutflowOutcome};

/// Worker that drains the outflow queue into the ledger core.
pub struct OutflowDispatcher<S> {
    ledger: Arc<LedgerService<S>>,
    requests: mpsc::UnboundedReceiver<OutflowRequest>,
    notifier: Notifier,
}

impl<S: LedgerStore> OutflowDispatcher<S> {
    pub fn new(
        ledger: Arc<LedgerService<S>>,
        requests: mpsc::UnboundedReceiver<OutflowRequest>,
        notifier: Notifier,
    ) -> Self {
        Self {
            ledger,
            requests,
            notifier,
        }
    }

    /// Run the dispatcher in the background. The task ends once the
    /// publishing half of the queue is dropped and the backlog is drained.
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        tracing::info!("outflow dispatcher started");

        while let Some(request) = self.requests.recv().await {
            self.process_outflow_request(request).await;
        }

        tracing::info!("outflow queue closed, dispatcher stopping");
    }

    /// Process one delivered queue message to its terminal state.
    pub async fn process_outflow_request(&self, request: OutflowRequest) {
        let transaction_type = request.transaction_type();

        let result = match request {
            OutflowRequest::Withdraw(payload) => {
                self.ledger.withdraw_from_wallet(payload).await
            }
            OutflowRequest::Transfer(payload) => self.ledger.wallet_transfer(payload).await,
        };

        match result {
            Ok(transaction) => {
                self.notifier.notify(OutflowOutcome::Completed {
                    transaction_id: transaction.id,
                    transaction_type,
                    amount: transaction.amount.value(),
                });
            }
            Err(error) => {
                let outcome = OutflowOutcome::Failed {
                    transaction_type,
                    reason: error.to_string(),
                    rejected: error.is_rejection(),
                };
                tracing::error!(
                    %transaction_type,
                    event = %serde_json::json!(outcome),
                    "outflow request failed"
                );
                self.notifier.notify(outcome);
            }
        }
    }
}
