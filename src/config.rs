//! Wallet core configuration from environment variables
//!
//! Controls where the file store lives, the address index ceiling and how
//! eagerly idle lock entries are swept.

use std::env;
use std::path::PathBuf;

use crate::account::MAX_INDEX_SPACE;
use crate::lock_table::DEFAULT_PRUNE_THRESHOLD;

#[derive(Clone, Debug)]
pub struct WalletConfig {
    /// Directory for the JSON file store; `None` means in-memory only
    pub data_dir: Option<PathBuf>,
    /// Exclusive upper bound for allocated address indices (at most 2^31)
    pub index_limit: u32,
    /// Lock table size past which idle entries are pruned
    pub lock_prune_threshold: usize,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            index_limit: MAX_INDEX_SPACE,
            lock_prune_threshold: DEFAULT_PRUNE_THRESHOLD,
        }
    }
}

impl WalletConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `WALLET_DATA_DIR`: file store directory (optional)
    /// - `WALLET_INDEX_LIMIT`: address index ceiling, clamped to 2^31
    /// - `WALLET_LOCK_PRUNE_THRESHOLD`: lock table prune threshold
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_dir = lookup("WALLET_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        match &data_dir {
            Some(dir) => log::info!("Wallet data directory: {}", dir.display()),
            None => log::info!("No WALLET_DATA_DIR set, using in-memory storage"),
        }

        let index_limit = match lookup("WALLET_INDEX_LIMIT").map(|v| v.trim().parse::<u32>()) {
            None => defaults.index_limit,
            Some(Ok(limit)) if limit <= MAX_INDEX_SPACE => limit,
            Some(Ok(limit)) => {
                log::warn!(
                    "WALLET_INDEX_LIMIT {} exceeds the index space, clamping to {}",
                    limit,
                    MAX_INDEX_SPACE
                );
                MAX_INDEX_SPACE
            }
            Some(Err(e)) => {
                log::warn!("Invalid WALLET_INDEX_LIMIT ({}), using default", e);
                defaults.index_limit
            }
        };

        let lock_prune_threshold =
            match lookup("WALLET_LOCK_PRUNE_THRESHOLD").map(|v| v.trim().parse::<usize>()) {
                None => defaults.lock_prune_threshold,
                Some(Ok(threshold)) if threshold > 0 => threshold,
                Some(_) => {
                    log::warn!("Invalid WALLET_LOCK_PRUNE_THRESHOLD, using default");
                    defaults.lock_prune_threshold
                }
            };

        Self {
            data_dir,
            index_limit,
            lock_prune_threshold,
        }
    }
}
