//! Core transfer engine.
//!
//! Moves funds from account 1 to account 2 along one of two paths:
//!
//! - **Without a transaction**: each write is committed on its own. If the
//!   credit fails after the debit succeeded, the debit stays committed and the
//!   ledger total shrinks. The caller gets `PartialTransfer`.
//! - **With a transaction**: both reads and both writes run inside one
//!   transaction. Any failure rolls back, so either both balances change or
//!   neither does.
//!
//! Neither path locks anything in-process. Concurrent non-atomic transfers can
//! lose updates; concurrent atomic transfers are only as safe as SQLite's own
//! isolation.

use crate::account::{Transfer, DESTINATION_ACCOUNT, SOURCE_ACCOUNT};
use crate::connection::ConnectionProvider;
use crate::error::{LedgerError, Result};
use crate::guard::with_statement;
use crate::reader::read_balance;
use crate::report::{self, LedgerReport};
use log::{debug, error, info, warn};
use rusqlite::{params, Connection};

const UPDATE_BALANCE: &str = "UPDATE accounts SET balance = ?1 WHERE id = ?2";

/// The ledger transfer engine.
///
/// Every operation acquires its own connection from the provider and
/// releases it before returning.
#[derive(Debug, Clone)]
pub struct TransferEngine {
    provider: ConnectionProvider,
}

impl TransferEngine {
    pub fn new(provider: ConnectionProvider) -> Self {
        TransferEngine { provider }
    }

    pub fn provider(&self) -> &ConnectionProvider {
        &self.provider
    }

    /// Transfers `amount` with each write committed independently.
    ///
    /// A failure of the second write leaves the first one committed; this is
    /// reported as `PartialTransfer` and the ledger no longer balances.
    pub fn transfer_without_transaction(&self, amount: i64) -> Result<Transfer> {
        let conn = self.provider.acquire()?;

        let transfer = plan_transfer(&conn, amount)?;

        write_balance(&conn, SOURCE_ACCOUNT, transfer.source_after)?;
        if let Err(e) = write_balance(&conn, DESTINATION_ACCOUNT, transfer.destination_after) {
            error!(
                "Credit of account {} failed after account {} was debited to {}; ledger is unbalanced: {}",
                DESTINATION_ACCOUNT, SOURCE_ACCOUNT, transfer.source_after, e
            );
            return Err(LedgerError::PartialTransfer {
                debited: transfer.source_after,
                source: Box::new(e),
            });
        }

        info!(
            "Transferred {} from account {} to account {} without transaction",
            amount, SOURCE_ACCOUNT, DESTINATION_ACCOUNT
        );
        Ok(transfer)
    }

    /// Transfers `amount` inside a single transaction.
    ///
    /// Commits only if both reads and both writes succeed; otherwise rolls
    /// back and returns the first failure. A rollback failure is logged and
    /// does not replace that failure.
    pub fn transfer_with_transaction(&self, amount: i64) -> Result<Transfer> {
        let conn = self.provider.acquire()?;
        let result = run_in_transaction(&conn, amount);
        restore_autocommit(&conn);

        if let Ok(transfer) = &result {
            info!(
                "Transferred {} from account {} to account {} in transaction",
                transfer.amount, SOURCE_ACCOUNT, DESTINATION_ACCOUNT
            );
        }
        result
    }

    /// Reads every account row, ordered by id.
    pub fn list_accounts(&self) -> Result<LedgerReport> {
        report::list_accounts(&self.provider)
    }
}

/// Reads both balances and computes the new ones.
fn plan_transfer(conn: &Connection, amount: i64) -> Result<Transfer> {
    let source_balance = read_balance(conn, SOURCE_ACCOUNT)?;
    let destination_balance = read_balance(conn, DESTINATION_ACCOUNT)?;
    Transfer::plan(amount, source_balance, destination_balance)
}

/// Sets the balance of one account. A write that matches no row fails.
fn write_balance(conn: &Connection, account_id: i64, balance: i64) -> Result<()> {
    with_statement(conn, UPDATE_BALANCE, |stmt| {
        let changed = stmt.execute(params![balance, account_id])?;
        if changed == 0 {
            return Err(LedgerError::AccountNotFound(account_id));
        }
        Ok(())
    })?;

    debug!("Wrote balance {} to account {}", balance, account_id);
    Ok(())
}

fn run_in_transaction(conn: &Connection, amount: i64) -> Result<Transfer> {
    let tx = conn.unchecked_transaction()?;

    let applied = plan_transfer(&tx, amount).and_then(|transfer| {
        write_balance(&tx, SOURCE_ACCOUNT, transfer.source_after)?;
        write_balance(&tx, DESTINATION_ACCOUNT, transfer.destination_after)?;
        Ok(transfer)
    });

    match applied {
        Ok(transfer) => {
            // A failed commit drops `tx`, which rolls back.
            tx.commit()?;
            debug!("Committed transfer of {}", amount);
            Ok(transfer)
        }
        Err(e) => {
            warn!("Transfer of {} failed, rolling back: {}", amount, e);
            if let Err(rollback_err) = tx.rollback() {
                error!("Rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}

/// Puts the connection back in autocommit mode if a transaction is still open.
fn restore_autocommit(conn: &Connection) {
    if conn.is_autocommit() {
        return;
    }

    warn!("Connection still inside a transaction, forcing rollback");
    if let Err(e) = conn.execute_batch("ROLLBACK") {
        error!("Error restoring autocommit: {}", e);
    }
}
