//! Account rows and transfer arithmetic.
//!
//! A transfer always debits [`SOURCE_ACCOUNT`] and credits
//! [`DESTINATION_ACCOUNT`]. A completed transfer keeps the sum of the two
//! balances unchanged.

use crate::error::{LedgerError, Result};
use serde::Serialize;

/// Account debited by every transfer.
pub const SOURCE_ACCOUNT: i64 = 1;

/// Account credited by every transfer.
pub const DESTINATION_ACCOUNT: i64 = 2;

/// Seed balance of the source account when initializing a store.
pub const DEFAULT_SOURCE_BALANCE: i64 = 1000;

/// Seed balance of the destination account when initializing a store.
pub const DEFAULT_DESTINATION_BALANCE: i64 = 500;

/// One row of the `accounts` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountRow {
    #[serde(rename = "account")]
    pub id: i64,
    pub balance: i64,
}

/// Balances before and after moving `amount` from source to destination.
///
/// # Negative Balances
///
/// No bounds are checked: the source may go negative, and a negative
/// `amount` moves funds from the destination back to the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub amount: i64,
    pub source_before: i64,
    pub source_after: i64,
    pub destination_before: i64,
    pub destination_after: i64,
}

impl Transfer {
    /// Computes the new balances for a transfer of `amount`.
    ///
    /// Fails with `BalanceOverflow` if either new balance does not fit in an `i64`.
    pub fn plan(amount: i64, source_balance: i64, destination_balance: i64) -> Result<Self> {
        let source_after =
            source_balance
                .checked_sub(amount)
                .ok_or(LedgerError::BalanceOverflow {
                    account: SOURCE_ACCOUNT,
                    balance: source_balance,
                    amount,
                })?;
        let destination_after =
            destination_balance
                .checked_add(amount)
                .ok_or(LedgerError::BalanceOverflow {
                    account: DESTINATION_ACCOUNT,
                    balance: destination_balance,
                    amount,
                })?;

        Ok(Transfer {
            amount,
            source_before: source_balance,
            source_after,
            destination_before: destination_balance,
            destination_after,
        })
    }

    /// Returns `true` if the two balances sum to the same total before and after.
    pub fn conserves_funds(&self) -> bool {
        let before = self.source_before as i128 + self.destination_before as i128;
        let after = self.source_after as i128 + self.destination_after as i128;
        before == after
    }
}
