//! Ledger Transfer CLI
//!
//! Transfers funds from account 1 to account 2 of a SQLite ledger and prints
//! the ledger.
//!
//! # Usage
//!
//! ```bash
//! ledger-transfer [--db <path>] init [<balance1> <balance2>]
//! ledger-transfer [--db <path>] transfer <amount>
//! ledger-transfer [--db <path>] transfer-unsafe <amount>
//! ledger-transfer [--db <path>] report [--csv]
//! ```
//!
//! # Environment Variables
//!
//! - `LEDGER_DB`: store location when `--db` is not given
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use ledger_transfer::account::{DEFAULT_DESTINATION_BALANCE, DEFAULT_SOURCE_BALANCE};
use ledger_transfer::{
    ConnectionProvider, LedgerError, Result, StoreConfig, Transfer, TransferEngine,
};
use std::env;
use std::io;
use std::process;

const USAGE: &str = "Usage: ledger-transfer [--db <path>] <init [<balance1> <balance2>] | transfer <amount> | transfer-unsafe <amount> | report [--csv]>";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let config = match args.iter().position(|a| a == "--db") {
        Some(idx) => {
            if idx + 1 >= args.len() {
                return Err(LedgerError::Usage(USAGE.to_string()));
            }
            let location = args.remove(idx + 1);
            args.remove(idx);
            StoreConfig::new(location)
        }
        None => StoreConfig::from_env(),
    };

    let engine = TransferEngine::new(ConnectionProvider::new(config));

    let (command, rest) = args
        .split_first()
        .ok_or_else(|| LedgerError::Usage(USAGE.to_string()))?;

    match (command.as_str(), rest) {
        ("init", []) => engine
            .provider()
            .initialize(DEFAULT_SOURCE_BALANCE, DEFAULT_DESTINATION_BALANCE),
        ("init", [source, destination]) => engine
            .provider()
            .initialize(parse_amount(source)?, parse_amount(destination)?),
        ("transfer", [amount]) => {
            let transfer = engine.transfer_with_transaction(parse_amount(amount)?)?;
            notify(&transfer);
            Ok(())
        }
        ("transfer-unsafe", [amount]) => {
            let transfer = engine.transfer_without_transaction(parse_amount(amount)?)?;
            notify(&transfer);
            Ok(())
        }
        ("report", []) => {
            print!("{}", engine.list_accounts()?.render());
            Ok(())
        }
        ("report", [flag]) if flag == "--csv" => {
            let stdout = io::stdout();
            let handle = stdout.lock();
            engine.list_accounts()?.write_csv(handle)
        }
        _ => Err(LedgerError::Usage(USAGE.to_string())),
    }
}

fn parse_amount(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| LedgerError::InvalidAmount(raw.to_string()))
}

fn notify(transfer: &Transfer) {
    println!(
        "Transfer completed: {} moved, account 1 {} -> {}, account 2 {} -> {}",
        transfer.amount,
        transfer.source_before,
        transfer.source_after,
        transfer.destination_before,
        transfer.destination_after
    );
}
