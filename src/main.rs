//! wallet_ledger - Double-Entry Wallet Ledger Service
//!
//! Records transfer, funding, and withdrawal events between wallets in an
//! append-only transaction log and derives balances by summing it. The
//! binary wires the PostgreSQL store, the ledger core, and the outflow
//! dispatcher together; transport in front of the queue and the service
//! entry points is deployment-specific and lives elsewhere.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use wallet_ledger::ledger::LedgerService;
use wallet_ledger::outflow::{outflow_channel, Notifier, OutflowDispatcher};
use wallet_ledger::store::PgLedgerStore;
use wallet_ledger::Config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallet_ledger=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting wallet_ledger service");
    tracing::info!("Connecting to database...");

    // Create database pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    // Ensure the ledger schema exists
    let store = Arc::new(PgLedgerStore::new(pool.clone()));
    store.migrate().await?;

    tracing::info!("Database connected, schema ready");

    // Wire core, queue, and dispatcher
    let ledger = Arc::new(LedgerService::new(store));
    let (queue, requests) = outflow_channel();
    let (notifier, mut outcomes) = Notifier::channel();

    let dispatcher = OutflowDispatcher::new(Arc::clone(&ledger), requests, notifier).start();

    // Notification delivery is an external collaborator; drain outcomes to
    // the log until one is attached.
    let outcome_sink = tokio::spawn(async move {
        while let Some(outcome) = outcomes.recv().await {
            tracing::info!(event = %serde_json::json!(outcome), "outflow outcome");
        }
    });

    tracing::info!("Outflow dispatcher running, awaiting shutdown signal");

    shutdown_signal().await;

    // Close the queue so the dispatcher drains its backlog and stops.
    drop(queue);
    dispatcher.await?;
    outcome_sink.await?;

    tracing::info!("Dispatcher drained, closing database connections...");
    pool.close().await;
    tracing::info!("Goodbye!");

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
