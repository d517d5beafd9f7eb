//! Read-only ledger report.
//!
//! The two rows are read with one statement and no transaction, so the report
//! is not guaranteed to be consistent against a concurrent writer.

use crate::account::AccountRow;
use crate::connection::ConnectionProvider;
use crate::error::Result;
use crate::guard::{with_cursor, with_statement};
use std::fmt::Write as _;
use std::io::Write;

const SELECT_ACCOUNTS: &str = "SELECT id, balance FROM accounts ORDER BY id";

/// Snapshot of every account row, ordered by id ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerReport {
    accounts: Vec<AccountRow>,
}

impl LedgerReport {
    pub fn new(accounts: Vec<AccountRow>) -> Self {
        LedgerReport { accounts }
    }

    pub fn accounts(&self) -> &[AccountRow] {
        &self.accounts
    }

    /// Sum of all balances in the report.
    pub fn total(&self) -> i128 {
        self.accounts.iter().map(|a| a.balance as i128).sum()
    }

    /// Formats one `Account: <id>, Balance: <balance>` line per row.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for account in &self.accounts {
            // Writing to a String cannot fail
            let _ = writeln!(out, "Account: {}, Balance: {}", account.id, account.balance);
        }
        out
    }

    /// Writes the report as `account,balance` CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if self.accounts.is_empty() {
            csv_writer.write_record(["account", "balance"])?;
        }
        for account in &self.accounts {
            csv_writer.serialize(account)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Reads all account rows with a single full-scan statement.
pub fn list_accounts(provider: &ConnectionProvider) -> Result<LedgerReport> {
    let conn = provider.acquire()?;

    let accounts = with_statement(&conn, SELECT_ACCOUNTS, |stmt| {
        with_cursor(stmt, [], |rows| {
            let mut accounts = Vec::new();
            while let Some(row) = rows.next()? {
                accounts.push(AccountRow {
                    id: row.get(0)?,
                    balance: row.get(1)?,
                });
            }
            Ok(accounts)
        })
    })?;

    Ok(LedgerReport::new(accounts))
}
