//! # Ledger Transfer
//!
//! Moves funds between two account rows of an embedded SQLite store, either
//! as two independently committed writes or inside one transaction.
//!
//! ## Design Principles
//!
//! - **Conservation**: a successful transfer keeps `balance_1 + balance_2` unchanged
//! - **All or nothing**: the transactional path rolls back on any read or write failure
//! - **Exposed hazard**: the non-transactional path keeps a committed debit when the
//!   credit fails, and reports it as `PartialTransfer`
//! - **Scoped resources**: cursors, statements and connections are released in that
//!   order on every exit path
//!
//! ## Example
//!
//! ```no_run
//! use ledger_transfer::{ConnectionProvider, StoreConfig, TransferEngine};
//!
//! let provider = ConnectionProvider::new(StoreConfig::new("bank.sqlite"));
//! provider.initialize(1000, 500).unwrap();
//!
//! let engine = TransferEngine::new(provider);
//! engine.transfer_with_transaction(200).unwrap();
//! print!("{}", engine.list_accounts().unwrap().render());
//! ```

pub mod account;
pub mod config;
pub mod connection;
pub mod error;
pub mod guard;
pub mod reader;
pub mod report;
pub mod transfer;

pub use account::{AccountRow, Transfer, DESTINATION_ACCOUNT, SOURCE_ACCOUNT};
pub use config::StoreConfig;
pub use connection::ConnectionProvider;
pub use error::{LedgerError, Result};
pub use reader::read_balance;
pub use report::LedgerReport;
pub use transfer::TransferEngine;
