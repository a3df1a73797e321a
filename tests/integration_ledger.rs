//! Ledger core integration tests
//!
//! Exercises the admission rules, derived balances, and the per-wallet
//! serialization of debit operations over the in-memory store.

mod common;

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use wallet_ledger::domain::{DomainError, FundFlowPayload, TransactionType, TransferPayload};
use wallet_ledger::outflow::{outflow_channel, Notifier, OutflowDispatcher, OutflowOutcome};
use wallet_ledger::AppError;
use wallet_ledger::OutflowRequest;

use common::{create_funded_wallet, create_wallet, memory_ledger};

// =========================================================================
// End-to-end scenarios
// =========================================================================

#[tokio::test]
async fn test_fund_withdraw_transfer_lifecycle() {
    let ledger = memory_ledger();
    let provider = Uuid::new_v4();

    // Create wallet A: balance 0.
    let a = create_wallet(&ledger).await;
    assert_eq!(ledger.get_balance(a).await.unwrap().value(), Decimal::ZERO);

    // Fund A with 500 from provider P.
    ledger
        .fund_wallet(FundFlowPayload {
            wallet_id: a,
            amount: dec!(500),
            payment_provider_id: provider,
        })
        .await
        .unwrap();
    assert_eq!(ledger.get_balance(a).await.unwrap().value(), dec!(500));

    // Withdraw 200 from A back to P.
    ledger
        .withdraw_from_wallet(FundFlowPayload {
            wallet_id: a,
            amount: dec!(200),
            payment_provider_id: provider,
        })
        .await
        .unwrap();
    assert_eq!(ledger.get_balance(a).await.unwrap().value(), dec!(300));

    // Transfer the remaining 300 to a new wallet B.
    let b = create_wallet(&ledger).await;
    ledger
        .wallet_transfer(TransferPayload {
            sender_wallet_id: a,
            receiver_wallet_id: b,
            amount: dec!(300),
        })
        .await
        .unwrap();

    assert_eq!(ledger.get_balance(a).await.unwrap().value(), Decimal::ZERO);
    assert_eq!(ledger.get_balance(b).await.unwrap().value(), dec!(300));

    // The full history of A: fund, withdraw, transfer, in admission order.
    let history = ledger.wallet_history(a).await.unwrap();
    let kinds: Vec<TransactionType> = history.iter().map(|t| t.transaction_type).collect();
    assert_eq!(
        kinds,
        vec![
            TransactionType::Fund,
            TransactionType::Withdraw,
            TransactionType::Transfer
        ]
    );
}

#[tokio::test]
async fn test_failed_transfer_changes_nothing() {
    let ledger = memory_ledger();
    let sender = create_funded_wallet(&ledger, dec!(50)).await;
    let receiver = create_wallet(&ledger).await;

    let err = ledger
        .wallet_transfer(TransferPayload {
            sender_wallet_id: sender,
            receiver_wallet_id: receiver,
            amount: dec!(51),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Domain(DomainError::InsufficientFunds { .. })
    ));
    assert_eq!(
        err.to_string(),
        "sender's balance is insufficient for this operation"
    );

    // No transaction admitted, both balances unchanged.
    assert_eq!(ledger.get_balance(sender).await.unwrap().value(), dec!(50));
    assert_eq!(
        ledger.get_balance(receiver).await.unwrap().value(),
        Decimal::ZERO
    );
    assert_eq!(ledger.wallet_history(receiver).await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_balance_matches_ledger_after_arbitrary_sequence() {
    let ledger = memory_ledger();
    let provider = Uuid::new_v4();
    let a = create_funded_wallet(&ledger, dec!(1000)).await;
    let b = create_funded_wallet(&ledger, dec!(250)).await;

    ledger
        .wallet_transfer(TransferPayload {
            sender_wallet_id: a,
            receiver_wallet_id: b,
            amount: dec!(400),
        })
        .await
        .unwrap();
    ledger
        .withdraw_from_wallet(FundFlowPayload {
            wallet_id: b,
            amount: dec!(100),
            payment_provider_id: provider,
        })
        .await
        .unwrap();
    ledger
        .wallet_transfer(TransferPayload {
            sender_wallet_id: b,
            receiver_wallet_id: a,
            amount: dec!(50),
        })
        .await
        .unwrap();

    // Recompute each balance from the raw history and compare.
    for wallet in [a, b] {
        let history = ledger.wallet_history(wallet).await.unwrap();
        let expected: Decimal = history
            .iter()
            .map(|t| {
                if t.receiver_id == wallet {
                    t.amount.value()
                } else {
                    -t.amount.value()
                }
            })
            .sum();
        assert_eq!(ledger.get_balance(wallet).await.unwrap().value(), expected);
    }

    assert_eq!(ledger.get_balance(a).await.unwrap().value(), dec!(650));
    assert_eq!(ledger.get_balance(b).await.unwrap().value(), dec!(500));
}

#[tokio::test]
async fn test_transfer_conserves_total_across_parties() {
    let ledger = memory_ledger();
    let a = create_funded_wallet(&ledger, dec!(800)).await;
    let b = create_funded_wallet(&ledger, dec!(200)).await;

    let total_before = ledger.get_balance(a).await.unwrap().value()
        + ledger.get_balance(b).await.unwrap().value();

    ledger
        .wallet_transfer(TransferPayload {
            sender_wallet_id: a,
            receiver_wallet_id: b,
            amount: dec!(123.45),
        })
        .await
        .unwrap();

    let total_after = ledger.get_balance(a).await.unwrap().value()
        + ledger.get_balance(b).await.unwrap().value();
    assert_eq!(total_before, total_after);
}

#[tokio::test]
async fn test_get_balance_is_idempotent() {
    let ledger = memory_ledger();
    let wallet = create_funded_wallet(&ledger, dec!(77.7)).await;

    let first = ledger.get_balance(wallet).await.unwrap();
    let second = ledger.get_balance(wallet).await.unwrap();
    assert_eq!(first, second);
}

// =========================================================================
// Concurrency: the check-then-act race must be closed
// =========================================================================

#[tokio::test]
async fn test_concurrent_withdrawals_cannot_overdraw() {
    let ledger = memory_ledger();
    let wallet = create_funded_wallet(&ledger, dec!(100)).await;
    let provider = Uuid::new_v4();

    let withdraw = || {
        let ledger = Arc::clone(&ledger);
        tokio::spawn(async move {
            ledger
                .withdraw_from_wallet(FundFlowPayload {
                    wallet_id: wallet,
                    amount: dec!(60),
                    payment_provider_id: provider,
                })
                .await
        })
    };

    let first = withdraw();
    let second = withdraw();

    let results = [first.await.unwrap(), second.await.unwrap()];
    let admitted = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| {
            matches!(
                r,
                Err(AppError::Domain(DomainError::InsufficientFunds { .. }))
            )
        })
        .count();

    assert_eq!(admitted, 1, "exactly one withdrawal must be admitted");
    assert_eq!(rejected, 1, "the other must fail with InsufficientFunds");
    assert_eq!(ledger.get_balance(wallet).await.unwrap().value(), dec!(40));
}

#[tokio::test]
async fn test_concurrent_transfers_from_same_sender_cannot_overdraw() {
    let ledger = memory_ledger();
    let sender = create_funded_wallet(&ledger, dec!(100)).await;
    let r1 = create_wallet(&ledger).await;
    let r2 = create_wallet(&ledger).await;

    let transfer = |receiver| {
        let ledger = Arc::clone(&ledger);
        tokio::spawn(async move {
            ledger
                .wallet_transfer(TransferPayload {
                    sender_wallet_id: sender,
                    receiver_wallet_id: receiver,
                    amount: dec!(60),
                })
                .await
        })
    };

    let results = [
        transfer(r1).await.unwrap(),
        transfer(r2).await.unwrap(),
    ];
    let admitted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(admitted, 1);

    // Never negative; the loser saw the post-admission balance.
    assert_eq!(ledger.get_balance(sender).await.unwrap().value(), dec!(40));
    let delivered = ledger.get_balance(r1).await.unwrap().value()
        + ledger.get_balance(r2).await.unwrap().value();
    assert_eq!(delivered, dec!(60));
}

#[tokio::test]
async fn test_concurrent_funding_is_never_rejected() {
    let ledger = memory_ledger();
    let wallet = create_wallet(&ledger).await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let ledger = Arc::clone(&ledger);
        handles.push(tokio::spawn(async move {
            ledger
                .fund_wallet(FundFlowPayload {
                    wallet_id: wallet,
                    amount: dec!(10),
                    payment_provider_id: Uuid::new_v4(),
                })
                .await
        }));
    }

    for handle in handles {
        handle.await.unwrap().expect("funding has no debit hazard");
    }
    assert_eq!(ledger.get_balance(wallet).await.unwrap().value(), dec!(100));
}

// =========================================================================
// Queue-driven dispatch
// =========================================================================

#[tokio::test]
async fn test_dispatcher_processes_mixed_backlog() {
    let ledger = memory_ledger();
    let wallet = create_funded_wallet(&ledger, dec!(100)).await;
    let receiver = create_wallet(&ledger).await;

    let (queue, requests) = outflow_channel();
    let (notifier, mut outcomes) = Notifier::channel();
    let handle = OutflowDispatcher::new(Arc::clone(&ledger), requests, notifier).start();

    queue.publish(OutflowRequest::Withdraw(FundFlowPayload {
        wallet_id: wallet,
        amount: dec!(30),
        payment_provider_id: Uuid::new_v4(),
    }));
    queue.publish(OutflowRequest::Transfer(TransferPayload {
        sender_wallet_id: wallet,
        receiver_wallet_id: receiver,
        amount: dec!(70),
    }));
    // Unknown wallet: rejected at the dispatch boundary, never propagates.
    queue.publish(OutflowRequest::Withdraw(FundFlowPayload {
        wallet_id: Uuid::new_v4(),
        amount: dec!(5),
        payment_provider_id: Uuid::new_v4(),
    }));

    let mut completed = 0;
    let mut failed = Vec::new();
    for _ in 0..3 {
        match outcomes.recv().await.unwrap() {
            OutflowOutcome::Completed { .. } => completed += 1,
            OutflowOutcome::Failed {
                reason, rejected, ..
            } => failed.push((reason, rejected)),
        }
    }

    assert_eq!(completed, 2);
    assert_eq!(failed, vec![("no wallet found".to_string(), true)]);

    assert_eq!(
        ledger.get_balance(wallet).await.unwrap().value(),
        Decimal::ZERO
    );
    assert_eq!(
        ledger.get_balance(receiver).await.unwrap().value(),
        dec!(70)
    );

    drop(queue);
    handle.await.unwrap();
}
