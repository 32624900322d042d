//! Address allocation, lookup and labelling

use super::Services;
use crate::account::{BlockchainAddress, MAX_INDEX_SPACE};
use crate::chain::ChainType;
use crate::codec::{preimage, AddressCodec};
use crate::derivation::{KeyDerivationProvider, COMPRESSED_PUBKEY_LEN};
use crate::error::BlockchainError;
use crate::types::{AccountId, HdPath, NymId, Subchain};

/// Compute the address string for `path / subchain / index` on `chain`.
///
/// Pure function of its inputs, so it can be recomputed offline.
pub fn calculate_address(
    deriver: &dyn KeyDerivationProvider,
    codec: &dyn AddressCodec,
    chain: ChainType,
    path: &HdPath,
    subchain: Subchain,
    index: u32,
) -> Result<String, BlockchainError> {
    let key = deriver.derive(path, subchain, index)?;
    if key.public_key.len() != COMPRESSED_PUBKEY_LEN {
        return Err(BlockchainError::Derivation(format!(
            "expected a {} byte compressed public key, got {} bytes",
            COMPRESSED_PUBKEY_LEN,
            key.public_key.len()
        )));
    }

    let hash = codec.hash160(&codec.hash(&key.public_key));
    Ok(codec.render(&preimage(chain.p2pkh_prefix(), &hash)))
}

/// Allocate the next address on `subchain` of an account
pub fn allocate_address(
    services: &Services,
    nym: &NymId,
    account_id: &AccountId,
    label: &str,
    subchain: Subchain,
) -> Result<BlockchainAddress, BlockchainError> {
    let _guard = services.account_locks.lock(account_id);
    let mut account = services.load_account(nym, account_id)?;

    let index = account.next_index(subchain);
    if index >= services.index_limit.min(MAX_INDEX_SPACE) {
        log::warn!(
            "Account {} exhausted its {} index space at {}",
            account_id,
            subchain,
            index
        );
        return Err(BlockchainError::IndexSpaceExhausted(subchain));
    }

    let address = calculate_address(
        services.deriver.as_ref(),
        services.codec.as_ref(),
        account.chain,
        &account.path,
        subchain,
        index,
    )?;
    let allocated = account.push_address(subchain, address, label)?;
    services.store.save_account(nym, &account)?;

    log::debug!(
        "Allocated {} address {} of account {}: {}",
        subchain,
        allocated.index,
        account_id,
        allocated.address
    );
    Ok(allocated)
}

/// Load an allocated address
pub fn load_address(
    services: &Services,
    nym: &NymId,
    account_id: &AccountId,
    index: u32,
    subchain: Subchain,
) -> Result<BlockchainAddress, BlockchainError> {
    let _guard = services.account_locks.lock(account_id);
    let account = services.load_account(nym, account_id)?;
    account.address(subchain, index).cloned()
}

/// Replace the label of an allocated address
pub fn assign_label(
    services: &Services,
    nym: &NymId,
    account_id: &AccountId,
    index: u32,
    subchain: Subchain,
    label: &str,
) -> Result<(), BlockchainError> {
    let _guard = services.account_locks.lock(account_id);
    let mut account = services.load_account(nym, account_id)?;

    let address = account.address_mut(subchain, index)?;
    if address.label == label {
        return Ok(());
    }
    address.label = label.to_string();
    account.bump_revision();
    services.store.save_account(nym, &account)?;
    Ok(())
}
