//! Transaction records referenced by accounts and addresses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chain::ChainType;

/// A blockchain transaction as seen by the wallet
///
/// The payload is opaque to the core; only `txid` is used for indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub txid: String,
    pub chain: ChainType,
    #[serde(with = "hex")]
    pub raw: Vec<u8>,
    pub memo: String,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(txid: impl Into<String>, chain: ChainType) -> Self {
        Self {
            txid: txid.into(),
            chain,
            raw: Vec::new(),
            memo: String::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_raw(mut self, raw: Vec<u8>) -> Self {
        self.raw = raw;
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }
}
