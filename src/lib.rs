//! Blockchain Wallet: deterministic HD accounts for Bitcoin-family chains
//!
//! This crate manages one HD account per (nym, chain), hands out receiving
//! and change addresses deterministically, binds addresses to contacts and
//! indexes transactions against those addresses.
//!
//! # Architecture
//!
//! - **Blockchain**: orchestrator exposing every operation
//! - **Lock tables**: one exclusive lock per nym (account creation) and per
//!   account (all account mutation)
//! - **Collaborators**: store, key derivation, address codec, activity
//!   threads and identity, each behind a trait with a reference implementation
//!
//! # Example
//!
//! ```ignore
//! use blockchain_wallet::*;
//!
//! let deriver = Arc::new(SeedDeriver::new());
//! let root = deriver.add_mnemonic(words)?;
//! let identity = Arc::new(MemoryIdentity::new());
//! identity.insert(nym.clone(), HdPath::new(root, vec![hardened(47), hardened(0)]));
//!
//! let chain = Blockchain::from_config(
//!     &WalletConfig::from_env(),
//!     deriver,
//!     Arc::new(MemoryActivity::new()),
//!     identity,
//! )?;
//!
//! let account = chain.new_account(&nym, Standard::Bip44, ChainType::Bitcoin)?;
//! let address = chain.allocate_address(&nym, &account, "rent", Subchain::External)?;
//! ```

// Public modules
pub mod account;
pub mod activity;
pub mod chain;
pub mod codec;
pub mod config;
pub mod derivation;
pub mod error;
pub mod identity;
pub mod lock_table;
pub mod manager;
pub mod ops;
pub mod storage;
pub mod transaction;
pub mod types;

// Re-exports for convenience
pub use account::{Account, BlockchainAddress, MAX_INDEX_SPACE};
pub use activity::{ActivityService, Direction, MemoryActivity, ThreadItem};
pub use chain::ChainType;
pub use codec::{AddressCodec, Base58Codec};
pub use config::WalletConfig;
pub use derivation::{KeyDerivationProvider, KeyMaterial, SeedDeriver};
pub use error::{BlockchainError, StorageError};
pub use identity::{IdentityProvider, MemoryIdentity};
pub use lock_table::{LockGuard, LockTable};
pub use manager::Blockchain;
pub use ops::address_ops::calculate_address;
pub use ops::transaction_ops::MigrationReport;
pub use storage::{AccountStore, FileSystemStore, MemoryStore};
pub use transaction::Transaction;
pub use types::{hardened, AccountId, ContactId, HdPath, NymId, Standard, Subchain, HARDENED};

// Common result type
pub type Result<T> = std::result::Result<T, BlockchainError>;
