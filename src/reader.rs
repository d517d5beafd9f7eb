//! Point reads of account balances.

use crate::error::{LedgerError, Result};
use crate::guard::{with_cursor, with_statement};
use log::{debug, warn};
use rusqlite::{params, Connection};

const SELECT_BALANCE: &str = "SELECT balance FROM accounts WHERE id = ?1";

/// Reads the current balance of `account_id`.
///
/// Fails with `AccountNotFound` if no row exists and with `Statement` if the
/// query fails. A default balance is never substituted.
pub fn read_balance(conn: &Connection, account_id: i64) -> Result<i64> {
    let balance = with_statement(conn, SELECT_BALANCE, |stmt| {
        with_cursor(stmt, params![account_id], |rows| match rows.next()? {
            Some(row) => Ok(row.get::<_, i64>(0)?),
            None => Err(LedgerError::AccountNotFound(account_id)),
        })
    })
    .map_err(|e| {
        warn!("Reading balance of account {} failed: {}", account_id, e);
        e
    })?;

    debug!("Read balance {} for account {}", balance, account_id);
    Ok(balance)
}
