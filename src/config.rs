//! Store configuration.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the default store location.
pub const LOCATION_ENV: &str = "LEDGER_DB";

/// Location used when neither `--db` nor `LEDGER_DB` is given.
pub const DEFAULT_LOCATION: &str = "./connect/bank.sqlite";

/// Where the ledger store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    location: PathBuf,
}

impl StoreConfig {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        StoreConfig {
            location: location.into(),
        }
    }

    /// Reads the location from `LEDGER_DB`, falling back to [`DEFAULT_LOCATION`].
    pub fn from_env() -> Self {
        match env::var_os(LOCATION_ENV) {
            Some(value) if !value.is_empty() => StoreConfig::new(value),
            _ => StoreConfig::default(),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_LOCATION)
    }
}
