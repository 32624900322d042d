//! Persistence layer
//!
//! - `AccountStore` trait: the single source of truth for account and
//!   transaction records
//! - In-memory store
//! - JSON file system store

mod file_system;
mod memory;

pub use file_system::FileSystemStore;
pub use memory::MemoryStore;

use std::collections::BTreeSet;

use crate::account::Account;
use crate::chain::ChainType;
use crate::error::StorageError;
use crate::transaction::Transaction;
use crate::types::{AccountId, NymId};

pub trait AccountStore: Send + Sync {
    fn load_account(&self, nym: &NymId, id: &AccountId) -> Result<Option<Account>, StorageError>;

    fn save_account(&self, nym: &NymId, account: &Account) -> Result<(), StorageError>;

    fn save_transaction(&self, tx: &Transaction) -> Result<(), StorageError>;

    fn list_accounts(
        &self,
        nym: &NymId,
        chain: ChainType,
    ) -> Result<BTreeSet<AccountId>, StorageError>;

    fn load_transaction(&self, txid: &str) -> Result<Option<Transaction>, StorageError>;
}
