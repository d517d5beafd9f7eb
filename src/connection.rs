//! Connection provider for the embedded ledger store.

use crate::account::{DESTINATION_ACCOUNT, SOURCE_ACCOUNT};
use crate::config::StoreConfig;
use crate::error::{LedgerError, Result};
use crate::guard::{with_statement, ConnectionGuard};
use log::{debug, info};
use rusqlite::{params, Connection, OpenFlags};
use std::fs;

const CREATE_ACCOUNTS: &str =
    "CREATE TABLE IF NOT EXISTS accounts (id INTEGER PRIMARY KEY, balance INTEGER NOT NULL)";

const UPSERT_ACCOUNT: &str = "INSERT INTO accounts (id, balance) VALUES (?1, ?2) \
     ON CONFLICT(id) DO UPDATE SET balance = excluded.balance";

/// Opens one connection per operation to the configured store.
///
/// Holds nothing but the store location; connections are never pooled.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    config: StoreConfig,
}

impl ConnectionProvider {
    pub fn new(config: StoreConfig) -> Self {
        ConnectionProvider { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Opens a read-write connection in autocommit mode.
    ///
    /// The store must already exist: a missing file is a `Connection` error,
    /// not a fresh empty database.
    pub fn acquire(&self) -> Result<ConnectionGuard> {
        let location = self.config.location();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(location, flags).map_err(|source| {
            LedgerError::Connection {
                location: location.to_path_buf(),
                source,
            }
        })?;

        debug!("Opened connection to {}", location.display());
        Ok(ConnectionGuard::new(conn))
    }

    /// Creates the store if needed and sets both accounts to the given balances.
    ///
    /// Existing rows are overwritten; the table is created if absent.
    pub fn initialize(&self, source_balance: i64, destination_balance: i64) -> Result<()> {
        let location = self.config.location();
        if let Some(parent) = location.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(location).map_err(|source| LedgerError::Connection {
            location: location.to_path_buf(),
            source,
        })?;
        let conn = ConnectionGuard::new(conn);

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(CREATE_ACCOUNTS)?;
        with_statement(&tx, UPSERT_ACCOUNT, |stmt| {
            stmt.execute(params![SOURCE_ACCOUNT, source_balance])?;
            stmt.execute(params![DESTINATION_ACCOUNT, destination_balance])?;
            Ok(())
        })?;
        tx.commit()?;

        info!(
            "Initialized ledger at {} with balances {{{}: {}, {}: {}}}",
            location.display(),
            SOURCE_ACCOUNT,
            source_balance,
            DESTINATION_ACCOUNT,
            destination_balance
        );
        Ok(())
    }
}
