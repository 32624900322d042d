//! In-memory store for tests and ephemeral wallets

use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};

use super::AccountStore;
use crate::account::Account;
use crate::chain::ChainType;
use crate::error::StorageError;
use crate::transaction::Transaction;
use crate::types::{AccountId, NymId};

#[derive(Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<NymId, HashMap<AccountId, Account>>>,
    transactions: RwLock<HashMap<String, Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of account records across all nyms
    pub fn account_count(&self) -> usize {
        self.accounts.read().values().map(HashMap::len).sum()
    }
}

impl AccountStore for MemoryStore {
    fn load_account(&self, nym: &NymId, id: &AccountId) -> Result<Option<Account>, StorageError> {
        Ok(self
            .accounts
            .read()
            .get(nym)
            .and_then(|accounts| accounts.get(id))
            .cloned())
    }

    fn save_account(&self, nym: &NymId, account: &Account) -> Result<(), StorageError> {
        self.accounts
            .write()
            .entry(nym.clone())
            .or_default()
            .insert(account.id.clone(), account.clone());
        Ok(())
    }

    fn save_transaction(&self, tx: &Transaction) -> Result<(), StorageError> {
        self.transactions
            .write()
            .insert(tx.txid.clone(), tx.clone());
        Ok(())
    }

    fn list_accounts(
        &self,
        nym: &NymId,
        chain: ChainType,
    ) -> Result<BTreeSet<AccountId>, StorageError> {
        Ok(self
            .accounts
            .read()
            .get(nym)
            .map(|accounts| {
                accounts
                    .values()
                    .filter(|account| account.chain == chain)
                    .map(|account| account.id.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn load_transaction(&self, txid: &str) -> Result<Option<Transaction>, StorageError> {
        Ok(self.transactions.read().get(txid).cloned())
    }
}
