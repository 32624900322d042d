//! JSON file store
//!
//! Every record is one pretty-printed JSON file. Identifiers are hex-encoded
//! into file names so no caller-supplied id can escape the base directory.

use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::AccountStore;
use crate::account::Account;
use crate::chain::ChainType;
use crate::error::StorageError;
use crate::transaction::Transaction;
use crate::types::{AccountId, NymId};

/// JSON-file backed store
///
/// Layout:
/// - `<base>/accounts/<hex(nym)>/<hex(account_id)>.json`
/// - `<base>/transactions/<hex(txid)>.json`
pub struct FileSystemStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSystemStore {
    /// Create a store rooted at `base_path`, creating the directory if needed
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = base_path.into();
        fs::create_dir_all(base_path.join("accounts"))?;
        fs::create_dir_all(base_path.join("transactions"))?;
        log::info!("Wallet store at {}", base_path.display());
        Ok(Self {
            base_path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_path
    }

    fn nym_dir(&self, nym: &NymId) -> PathBuf {
        self.base_path
            .join("accounts")
            .join(hex::encode(nym.as_str()))
    }

    fn account_path(&self, nym: &NymId, id: &AccountId) -> PathBuf {
        self.nym_dir(nym)
            .join(format!("{}.json", hex::encode(id.as_str())))
    }

    fn transaction_path(&self, txid: &str) -> PathBuf {
        self.base_path
            .join("transactions")
            .join(format!("{}.json", hex::encode(txid)))
    }

    /// Write through a temporary file so readers never see a torn record
    fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(value)?;
        let tmp = path.with_extension("json.tmp");

        let _guard = self.write_lock.lock();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }
}

impl AccountStore for FileSystemStore {
    fn load_account(&self, nym: &NymId, id: &AccountId) -> Result<Option<Account>, StorageError> {
        Self::read_json(&self.account_path(nym, id))
    }

    fn save_account(&self, nym: &NymId, account: &Account) -> Result<(), StorageError> {
        self.write_json(&self.account_path(nym, &account.id), account)
    }

    fn save_transaction(&self, tx: &Transaction) -> Result<(), StorageError> {
        self.write_json(&self.transaction_path(&tx.txid), tx)
    }

    fn list_accounts(
        &self,
        nym: &NymId,
        chain: ChainType,
    ) -> Result<BTreeSet<AccountId>, StorageError> {
        let dir = self.nym_dir(nym);
        if !dir.exists() {
            return Ok(BTreeSet::new());
        }

        let mut accounts = BTreeSet::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match Self::read_json::<Account>(&path) {
                Ok(Some(account)) if account.chain == chain => {
                    accounts.insert(account.id);
                }
                Ok(_) => {}
                Err(StorageError::Json(e)) => {
                    log::warn!("Skipping unreadable account file {}: {}", path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(accounts)
    }

    fn load_transaction(&self, txid: &str) -> Result<Option<Transaction>, StorageError> {
        Self::read_json(&self.transaction_path(txid))
    }
}
