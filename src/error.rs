//! Error types for the ledger transfer engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while talking to the ledger store.
///
/// Failures to release a cursor, statement or connection are not represented
/// here: they are logged by the resource guards and never reach the caller.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The store could not be opened at the configured location
    #[error("cannot open ledger store at {}: {source}", .location.display())]
    Connection {
        location: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A read, write, commit or rollback statement failed
    #[error("SQL statement failed: {0}")]
    Statement(#[from] rusqlite::Error),

    /// No row exists for the requested account id
    #[error("account {0} not found")]
    AccountNotFound(i64),

    /// Non-atomic transfer: the debit was committed but the credit failed
    #[error("transfer partially applied: source debited to {debited} but credit failed: {source}")]
    PartialTransfer {
        debited: i64,
        #[source]
        source: Box<LedgerError>,
    },

    /// The new balance does not fit in a 64-bit integer; nothing was written
    #[error("balance overflow on account {account}: {balance} with amount {amount}")]
    BalanceOverflow {
        account: i64,
        balance: i64,
        amount: i64,
    },

    /// Filesystem or output error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV report writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Transfer amount argument is not an integer
    #[error("invalid amount '{0}': expected an integer")]
    InvalidAmount(String),

    /// Bad command line
    #[error("{0}")]
    Usage(String),
}
