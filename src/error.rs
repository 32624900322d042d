//! Error types for wallet core operations
//!
//! Every public operation returns one of these as an explicit value. Lower
//! level collaborator failures (derivation, storage, activity) are wrapped
//! here and surfaced immediately.

use thiserror::Error;

use crate::types::{AccountId, Subchain};

#[derive(Error, Debug)]
pub enum BlockchainError {
    #[error("Invalid HD path: {0}")]
    InvalidPath(String),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Index {index} not allocated on {subchain} subchain")]
    IndexNotAllocated { index: u32, subchain: Subchain },

    #[error("Index space exhausted on {0} subchain")]
    IndexSpaceExhausted(Subchain),

    #[error("Derivation error: {0}")]
    Derivation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Activity error: {0}")]
    Activity(String),

    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BlockchainError {
    /// Only storage failures are transient; everything else is a permanent
    /// condition for the operation that raised it.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}
