//! Wallet core operations
//!
//! - `account_ops.rs` - account creation and listing
//! - `address_ops.rs` - address allocation, lookup and labelling
//! - `transaction_ops.rs` - transaction indexing and contact binding
//!
//! Every operation takes the shared [`Services`] and holds at most one lock
//! from each lock table for its whole body.

pub mod account_ops;
pub mod address_ops;
pub mod transaction_ops;

use std::sync::Arc;

use crate::account::Account;
use crate::activity::ActivityService;
use crate::codec::AddressCodec;
use crate::derivation::KeyDerivationProvider;
use crate::error::BlockchainError;
use crate::identity::IdentityProvider;
use crate::lock_table::LockTable;
use crate::storage::AccountStore;
use crate::types::{AccountId, NymId};

/// Collaborators and lock tables shared by all operations
pub struct Services {
    pub store: Arc<dyn AccountStore>,
    pub deriver: Arc<dyn KeyDerivationProvider>,
    pub codec: Arc<dyn AddressCodec>,
    pub activity: Arc<dyn ActivityService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub nym_locks: LockTable<NymId>,
    pub account_locks: LockTable<AccountId>,
    pub index_limit: u32,
}

impl Services {
    /// Fresh read of an account record; callers must hold the account lock.
    pub(crate) fn load_account(&self, nym: &NymId, id: &AccountId) -> Result<Account, BlockchainError> {
        self.store
            .load_account(nym, id)?
            .ok_or_else(|| BlockchainError::AccountNotFound(id.clone()))
    }
}
