//! Wallet core orchestrator
//!
//! [`Blockchain`] wires the collaborators and lock tables together and
//! delegates each call to the matching `ops` module.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::account::{Account, BlockchainAddress};
use crate::activity::ActivityService;
use crate::chain::ChainType;
use crate::codec::{AddressCodec, Base58Codec};
use crate::config::WalletConfig;
use crate::derivation::KeyDerivationProvider;
use crate::error::BlockchainError;
use crate::identity::IdentityProvider;
use crate::lock_table::LockTable;
use crate::ops::transaction_ops::MigrationReport;
use crate::ops::{account_ops, address_ops, transaction_ops, Services};
use crate::storage::{AccountStore, FileSystemStore, MemoryStore};
use crate::transaction::Transaction;
use crate::types::{AccountId, ContactId, NymId, Standard, Subchain};

/// Entry point for every wallet core operation
///
/// Safe to share across threads. Operations on different accounts run in
/// parallel; operations on the same account serialize on its lock.
pub struct Blockchain {
    services: Services,
}

impl Blockchain {
    pub fn new(
        config: &WalletConfig,
        store: Arc<dyn AccountStore>,
        deriver: Arc<dyn KeyDerivationProvider>,
        activity: Arc<dyn ActivityService>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            services: Services {
                store,
                deriver,
                codec: Arc::new(Base58Codec),
                activity,
                identity,
                nym_locks: LockTable::with_prune_threshold(config.lock_prune_threshold),
                account_locks: LockTable::with_prune_threshold(config.lock_prune_threshold),
                index_limit: config.index_limit,
            },
        }
    }

    /// Build with the store selected by `config.data_dir`
    pub fn from_config(
        config: &WalletConfig,
        deriver: Arc<dyn KeyDerivationProvider>,
        activity: Arc<dyn ActivityService>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, BlockchainError> {
        let store: Arc<dyn AccountStore> = match &config.data_dir {
            Some(dir) => Arc::new(FileSystemStore::new(dir)?),
            None => Arc::new(MemoryStore::new()),
        };
        Ok(Self::new(config, store, deriver, activity, identity))
    }

    /// Replace the address codec
    pub fn with_codec(mut self, codec: Arc<dyn AddressCodec>) -> Self {
        self.services.codec = codec;
        self
    }

    pub fn new_account(
        &self,
        nym: &NymId,
        standard: Standard,
        chain: ChainType,
    ) -> Result<AccountId, BlockchainError> {
        account_ops::new_account(&self.services, nym, standard, chain)
    }

    pub fn account_list(
        &self,
        nym: &NymId,
        chain: ChainType,
    ) -> Result<BTreeSet<AccountId>, BlockchainError> {
        account_ops::account_list(&self.services, nym, chain)
    }

    pub fn account(&self, nym: &NymId, account_id: &AccountId) -> Result<Account, BlockchainError> {
        account_ops::account(&self.services, nym, account_id)
    }

    pub fn allocate_address(
        &self,
        nym: &NymId,
        account_id: &AccountId,
        label: &str,
        subchain: Subchain,
    ) -> Result<BlockchainAddress, BlockchainError> {
        address_ops::allocate_address(&self.services, nym, account_id, label, subchain)
    }

    pub fn load_address(
        &self,
        nym: &NymId,
        account_id: &AccountId,
        index: u32,
        subchain: Subchain,
    ) -> Result<BlockchainAddress, BlockchainError> {
        address_ops::load_address(&self.services, nym, account_id, index, subchain)
    }

    pub fn assign_label(
        &self,
        nym: &NymId,
        account_id: &AccountId,
        index: u32,
        subchain: Subchain,
        label: &str,
    ) -> Result<(), BlockchainError> {
        address_ops::assign_label(&self.services, nym, account_id, index, subchain, label)
    }

    pub fn assign_address(
        &self,
        nym: &NymId,
        account_id: &AccountId,
        index: u32,
        subchain: Subchain,
        contact: &ContactId,
    ) -> Result<MigrationReport, BlockchainError> {
        transaction_ops::assign_address(&self.services, nym, account_id, index, subchain, contact)
    }

    pub fn store_incoming(
        &self,
        nym: &NymId,
        account_id: &AccountId,
        index: u32,
        subchain: Subchain,
        tx: &Transaction,
    ) -> Result<(), BlockchainError> {
        transaction_ops::store_incoming(&self.services, nym, account_id, index, subchain, tx)
    }

    pub fn store_outgoing(
        &self,
        nym: &NymId,
        account_id: &AccountId,
        contact: Option<&ContactId>,
        tx: &Transaction,
    ) -> Result<(), BlockchainError> {
        transaction_ops::store_outgoing(&self.services, nym, account_id, contact, tx)
    }

    pub fn load_transaction(&self, txid: &str) -> Result<Transaction, BlockchainError> {
        transaction_ops::load_transaction(&self.services, txid)
    }

    /// Recompute an account's address offline, without allocating
    pub fn calculate_address(
        &self,
        account: &Account,
        subchain: Subchain,
        index: u32,
    ) -> Result<String, BlockchainError> {
        address_ops::calculate_address(
            self.services.deriver.as_ref(),
            self.services.codec.as_ref(),
            account.chain,
            &account.path,
            subchain,
            index,
        )
    }
}
