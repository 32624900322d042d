//! Account creation and listing
//!
//! One account exists per (nym, chain). Its path hangs off the root of the
//! nym's HD path and its id is a pure function of (chain, id-path).

use std::collections::BTreeSet;

use super::Services;
use crate::account::Account;
use crate::chain::ChainType;
use crate::error::BlockchainError;
use crate::types::{hardened, AccountId, HdPath, NymId, Standard, BIP44_PURPOSE, HARDENED};

/// Build the account path and the path its id is derived from.
///
/// The account index is the second child of the nym root path with the
/// hardened bit cleared.
pub fn account_paths(
    nym_path: &HdPath,
    standard: Standard,
    chain: ChainType,
) -> Result<(HdPath, HdPath), BlockchainError> {
    let account_index = nym_path.child(1).ok_or_else(|| {
        BlockchainError::InvalidPath(format!(
            "nym path {} needs at least two children",
            nym_path
        ))
    })? & !HARDENED;

    let root = HdPath::new(nym_path.root.clone(), Vec::new());
    match standard {
        Standard::Bip32 => {
            let path = root.with_child(hardened(account_index));
            Ok((path.clone(), path))
        }
        Standard::Bip44 => {
            let base = root
                .with_child(hardened(BIP44_PURPOSE))
                .with_child(hardened(chain.bip44_coin_type()));
            let path = base.clone().with_child(account_index);
            let id_path = base.with_child(hardened(account_index));
            Ok((path, id_path))
        }
    }
}

/// Create the account for (nym, chain), or return the existing one
pub fn new_account(
    services: &Services,
    nym: &NymId,
    standard: Standard,
    chain: ChainType,
) -> Result<AccountId, BlockchainError> {
    let nym_path = services
        .identity
        .root_path(nym)
        .ok_or_else(|| BlockchainError::InvalidPath(format!("no HD path for nym {}", nym)))?;
    if nym_path.root.is_empty() {
        return Err(BlockchainError::InvalidPath(format!(
            "nym {} has an empty HD root",
            nym
        )));
    }

    let _guard = services.nym_locks.lock(nym);

    if let Some(existing) = services.store.list_accounts(nym, chain)?.into_iter().next() {
        log::debug!("Nym {} already has {} account {}", nym, chain, existing);
        return Ok(existing);
    }

    let (path, id_path) = account_paths(&nym_path, standard, chain)?;
    let id = AccountId::derive(chain, &id_path);
    let account = Account::new(id.clone(), nym.clone(), chain, standard, path);

    services.store.save_account(nym, &account)?;
    log::info!(
        "Created {} account {} for nym {} at {}",
        chain,
        id,
        nym,
        account.path
    );
    Ok(id)
}

/// Account ids of `nym` on `chain`
pub fn account_list(
    services: &Services,
    nym: &NymId,
    chain: ChainType,
) -> Result<BTreeSet<AccountId>, BlockchainError> {
    Ok(services.store.list_accounts(nym, chain)?)
}

/// Snapshot of an account record
pub fn account(
    services: &Services,
    nym: &NymId,
    id: &AccountId,
) -> Result<Account, BlockchainError> {
    let _guard = services.account_locks.lock(id);
    services.load_account(nym, id)
}
