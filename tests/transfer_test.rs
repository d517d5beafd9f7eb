//! Transfer properties against a real SQLite store.
//!
//! Failures are injected with a trigger that aborts any update of account 2,
//! so the second write of a transfer fails inside the store itself.

use ledger_transfer::{
    read_balance, AccountRow, ConnectionProvider, LedgerError, StoreConfig, TransferEngine,
};
use rusqlite::Connection;
use tempfile::TempDir;

const FAIL_CREDIT: &str = "CREATE TRIGGER fail_credit BEFORE UPDATE ON accounts \
     WHEN NEW.id = 2 BEGIN SELECT RAISE(ABORT, 'credit rejected'); END";

fn engine_with(source: i64, destination: i64) -> (TempDir, TransferEngine) {
    let dir = TempDir::new().unwrap();
    let provider = ConnectionProvider::new(StoreConfig::new(dir.path().join("bank.sqlite")));
    provider.initialize(source, destination).unwrap();
    (dir, TransferEngine::new(provider))
}

fn inject_credit_failure(dir: &TempDir) {
    let conn = Connection::open(dir.path().join("bank.sqlite")).unwrap();
    conn.execute_batch(FAIL_CREDIT).unwrap();
}

fn balances(engine: &TransferEngine) -> (i64, i64) {
    let report = engine.list_accounts().unwrap();
    let rows = report.accounts();
    assert_eq!(rows.len(), 2);
    (rows[0].balance, rows[1].balance)
}

// ==================== TRANSACTIONAL PATH ====================

#[test]
fn test_transaction_scenario_1000_500_transfer_200() {
    let (_dir, engine) = engine_with(1000, 500);

    engine.transfer_with_transaction(200).unwrap();

    assert_eq!(balances(&engine), (800, 700));
    assert_eq!(engine.list_accounts().unwrap().total(), 1500);
}

#[test]
fn test_transaction_conserves_funds_across_amounts() {
    let amounts = [0, 1, 200, 999, 1000, 5000, -300, i64::from(i32::MAX)];

    for amount in amounts {
        let (_dir, engine) = engine_with(1000, 500);
        let (before_src, before_dst) = balances(&engine);

        let transfer = engine.transfer_with_transaction(amount).unwrap();
        let (after_src, after_dst) = balances(&engine);

        assert_eq!(after_src, before_src - amount, "amount {}", amount);
        assert_eq!(after_dst, before_dst + amount, "amount {}", amount);
        assert_eq!(after_src + after_dst, before_src + before_dst);
        assert!(transfer.conserves_funds());
    }
}

#[test]
fn test_transaction_sequence_conserves_funds() {
    let (_dir, engine) = engine_with(1000, 500);

    for amount in [100, 250, -50, 700] {
        engine.transfer_with_transaction(amount).unwrap();
    }

    assert_eq!(balances(&engine), (0, 1500));
}

#[test]
fn test_transaction_rollback_restores_both_balances() {
    let (dir, engine) = engine_with(1000, 500);
    inject_credit_failure(&dir);

    let result = engine.transfer_with_transaction(200);

    assert!(result.is_err());
    assert_eq!(balances(&engine), (1000, 500));
}

#[test]
fn test_transaction_usable_after_rollback() {
    let (dir, engine) = engine_with(1000, 500);
    inject_credit_failure(&dir);
    assert!(engine.transfer_with_transaction(200).is_err());

    let conn = Connection::open(dir.path().join("bank.sqlite")).unwrap();
    conn.execute_batch("DROP TRIGGER fail_credit").unwrap();
    drop(conn);

    engine.transfer_with_transaction(200).unwrap();
    assert_eq!(balances(&engine), (800, 700));
}

#[test]
fn test_transaction_allows_negative_balance() {
    let (_dir, engine) = engine_with(1000, 500);

    engine.transfer_with_transaction(1200).unwrap();

    assert_eq!(balances(&engine), (-200, 1700));
}

// ==================== NON-TRANSACTIONAL PATH ====================

#[test]
fn test_plain_scenario_failed_credit_destroys_funds() {
    let (dir, engine) = engine_with(1000, 500);
    inject_credit_failure(&dir);

    let err = engine.transfer_without_transaction(200).unwrap_err();

    assert!(matches!(err, LedgerError::PartialTransfer { debited: 800, .. }));
    assert_eq!(balances(&engine), (800, 500));
    assert_eq!(engine.list_accounts().unwrap().total(), 1300);
}

#[test]
fn test_plain_success_matches_transaction_result() {
    let (_dir, plain) = engine_with(1000, 500);
    let (_dir2, atomic) = engine_with(1000, 500);

    plain.transfer_without_transaction(350).unwrap();
    atomic.transfer_with_transaction(350).unwrap();

    assert_eq!(balances(&plain), balances(&atomic));
}

// ==================== READS AND REPORT ====================

#[test]
fn test_read_balance_is_idempotent() {
    let (_dir, engine) = engine_with(1000, 500);
    let conn = engine.provider().acquire().unwrap();

    assert_eq!(read_balance(&conn, 1).unwrap(), read_balance(&conn, 1).unwrap());
    assert_eq!(read_balance(&conn, 2).unwrap(), read_balance(&conn, 2).unwrap());
}

#[test]
fn test_read_balance_missing_account() {
    let (_dir, engine) = engine_with(1000, 500);
    let conn = engine.provider().acquire().unwrap();

    assert!(matches!(
        read_balance(&conn, 42),
        Err(LedgerError::AccountNotFound(42))
    ));
}

#[test]
fn test_report_lists_exactly_two_rows_in_order() {
    let (_dir, engine) = engine_with(1000, 500);
    engine.transfer_with_transaction(200).unwrap();

    let report = engine.list_accounts().unwrap();

    assert_eq!(
        report.accounts(),
        &[
            AccountRow {
                id: 1,
                balance: 800
            },
            AccountRow {
                id: 2,
                balance: 700
            },
        ]
    );
    assert_eq!(
        report.render(),
        "Account: 1, Balance: 800\nAccount: 2, Balance: 700\n"
    );
}

// ==================== CONNECTION FAILURES ====================

#[test]
fn test_missing_store_fails_every_operation() {
    let dir = TempDir::new().unwrap();
    let provider = ConnectionProvider::new(StoreConfig::new(dir.path().join("missing.sqlite")));
    let engine = TransferEngine::new(provider);

    assert!(matches!(
        engine.transfer_with_transaction(1),
        Err(LedgerError::Connection { .. })
    ));
    assert!(matches!(
        engine.transfer_without_transaction(1),
        Err(LedgerError::Connection { .. })
    ));
    assert!(matches!(
        engine.list_accounts(),
        Err(LedgerError::Connection { .. })
    ));
}
