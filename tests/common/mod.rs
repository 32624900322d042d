//! Common test utilities for wallet core integration tests
//!
//! - Logging setup
//! - A fully wired in-memory `Blockchain` seeded from a fixed mnemonic
//! - Store and activity doubles that fail on demand

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use blockchain_wallet::{
    hardened, Account, AccountId, AccountStore, ActivityService, Blockchain, BlockchainError,
    ChainType, ContactId, HdPath, MemoryActivity, MemoryIdentity, MemoryStore, NymId,
    SeedDeriver, StorageError, Transaction, WalletConfig,
};

pub const WORDS: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

pub fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

/// Wallet core wired to in-memory collaborators
pub struct TestEnvironment {
    pub chain: Blockchain,
    pub store: Arc<FlakyStore>,
    pub activity: Arc<FlakyActivity>,
    pub deriver: Arc<SeedDeriver>,
    pub identity: Arc<MemoryIdentity>,
    pub nym: NymId,
    pub root: String,
}

impl TestEnvironment {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(WalletConfig::default())
    }

    pub fn with_config(config: WalletConfig) -> anyhow::Result<Self> {
        init_logging();

        let deriver = Arc::new(SeedDeriver::new());
        let root = deriver.add_mnemonic(WORDS)?;

        let nym = NymId::new("N1");
        let identity = Arc::new(MemoryIdentity::new());
        identity.insert(nym.clone(), nym_path(&root, 0));

        let store = Arc::new(FlakyStore::default());
        let activity = Arc::new(FlakyActivity::default());
        let chain = Blockchain::new(
            &config,
            store.clone(),
            deriver.clone(),
            activity.clone(),
            identity.clone(),
        );

        Ok(Self {
            chain,
            store,
            activity,
            deriver,
            identity,
            nym,
            root,
        })
    }

    /// Register another nym on the same seed
    pub fn add_nym(&self, name: &str, nym_index: u32) -> NymId {
        let nym = NymId::new(name);
        self.identity.insert(nym.clone(), nym_path(&self.root, nym_index));
        nym
    }

    pub fn thread(&self, contact: &ContactId) -> Option<Vec<String>> {
        self.activity
            .inner
            .thread(&self.nym, contact)
            .map(|items| items.into_iter().map(|item| item.txid).collect())
    }
}

pub fn nym_path(root: &str, nym_index: u32) -> HdPath {
    HdPath::new(root, vec![hardened(47), hardened(nym_index)])
}

pub fn tx(txid: &str) -> Transaction {
    Transaction::new(txid, ChainType::Bitcoin)
}

/// Memory store whose writes can be switched off
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_saves: AtomicBool,
    pub fail_transaction_saves: AtomicBool,
}

impl FlakyStore {
    pub fn set_failing(&self, failing: bool) {
        self.fail_saves.store(failing, Ordering::SeqCst);
    }

    /// Fail only transaction writes; account writes keep working
    pub fn set_failing_transactions(&self, failing: bool) {
        self.fail_transaction_saves.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("writes disabled".into()));
        }
        Ok(())
    }
}

impl AccountStore for FlakyStore {
    fn load_account(&self, nym: &NymId, id: &AccountId) -> Result<Option<Account>, StorageError> {
        self.inner.load_account(nym, id)
    }

    fn save_account(&self, nym: &NymId, account: &Account) -> Result<(), StorageError> {
        self.check()?;
        self.inner.save_account(nym, account)
    }

    fn save_transaction(&self, tx: &Transaction) -> Result<(), StorageError> {
        self.check()?;
        if self.fail_transaction_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("transaction writes disabled".into()));
        }
        self.inner.save_transaction(tx)
    }

    fn list_accounts(
        &self,
        nym: &NymId,
        chain: ChainType,
    ) -> Result<BTreeSet<AccountId>, StorageError> {
        self.inner.list_accounts(nym, chain)
    }

    fn load_transaction(&self, txid: &str) -> Result<Option<Transaction>, StorageError> {
        self.inner.load_transaction(txid)
    }
}

/// Memory activity that refuses to thread one poisoned txid
#[derive(Default)]
pub struct FlakyActivity {
    pub inner: MemoryActivity,
    pub poisoned: parking_lot::Mutex<Option<String>>,
}

impl FlakyActivity {
    pub fn poison(&self, txid: &str) {
        *self.poisoned.lock() = Some(txid.to_string());
    }

    fn check(&self, txid: &str) -> Result<(), BlockchainError> {
        if self.poisoned.lock().as_deref() == Some(txid) {
            return Err(BlockchainError::Activity(format!("cannot thread {}", txid)));
        }
        Ok(())
    }
}

impl ActivityService for FlakyActivity {
    fn ensure_thread(&self, nym: &NymId, contact: &ContactId) -> Result<(), BlockchainError> {
        self.inner.ensure_thread(nym, contact)
    }

    fn add_incoming(
        &self,
        nym: &NymId,
        contact: &ContactId,
        tx: &Transaction,
    ) -> Result<(), BlockchainError> {
        self.check(&tx.txid)?;
        self.inner.add_incoming(nym, contact, tx)
    }

    fn add_outgoing(
        &self,
        nym: &NymId,
        contact: &ContactId,
        tx: &Transaction,
    ) -> Result<(), BlockchainError> {
        self.check(&tx.txid)?;
        self.inner.add_outgoing(nym, contact, tx)
    }

    fn move_incoming(
        &self,
        nym: &NymId,
        from: &ContactId,
        to: &ContactId,
        txid: &str,
    ) -> Result<bool, BlockchainError> {
        self.check(txid)?;
        self.inner.move_incoming(nym, from, to, txid)
    }
}
