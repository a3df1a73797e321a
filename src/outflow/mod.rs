//! Outflow module
//!
//! Asynchronous path for debit-causing requests: queue, dispatcher, and
//! outcome notifications.

mod dispatcher;
mod notify;
mod queue;

pub use dispatcher::OutflowDispatcher;
pub use notify::{Notifier, OutflowOutcome};
pub use queue::{outflow_channel, OutflowQueue};
