//! Transaction indexing and contact binding
//!
//! Incoming transactions are recorded on the receiving address, outgoing
//! ones on the account. Binding an address to a contact threads every
//! transaction it has already received under that contact.
//!
//! ## Migration
//!
//! `assign_address` commits the new binding first and then migrates thread
//! items one txid at a time. A failing txid is collected in the returned
//! [`MigrationReport`]; items already migrated stay migrated and the binding
//! is not rolled back.

use serde::{Deserialize, Serialize};

use super::Services;
use crate::error::BlockchainError;
use crate::transaction::Transaction;
use crate::types::{AccountId, ContactId, NymId, Subchain};

/// Outcome of the thread migration performed by `assign_address`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    pub previous: Option<ContactId>,
    /// Txids now threaded under the new contact
    pub migrated: Vec<String>,
    /// Txids that could not be migrated, with the reason
    pub failed: Vec<(String, String)>,
}

impl MigrationReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Record a transaction received on an allocated address
pub fn store_incoming(
    services: &Services,
    nym: &NymId,
    account_id: &AccountId,
    index: u32,
    subchain: Subchain,
    tx: &Transaction,
) -> Result<(), BlockchainError> {
    let _guard = services.account_locks.lock(account_id);
    let mut account = services.load_account(nym, account_id)?;

    let address = account.address_mut(subchain, index)?;
    let added = address.add_incoming(&tx.txid);
    let contact = address.contact.clone();
    if added {
        account.bump_revision();
    } else {
        log::debug!("Incoming {} already recorded on {} {}", tx.txid, subchain, index);
    }

    services.store.save_transaction(tx)?;
    services.store.save_account(nym, &account)?;

    if let Some(contact) = contact {
        services.activity.ensure_thread(nym, &contact)?;
        services.activity.add_incoming(nym, &contact, tx)?;
    }
    Ok(())
}

/// Record a transaction sent from an account
pub fn store_outgoing(
    services: &Services,
    nym: &NymId,
    account_id: &AccountId,
    contact: Option<&ContactId>,
    tx: &Transaction,
) -> Result<(), BlockchainError> {
    let _guard = services.account_locks.lock(account_id);
    let mut account = services.load_account(nym, account_id)?;

    if account.add_outgoing(&tx.txid) {
        account.bump_revision();
    }
    services.store.save_transaction(tx)?;
    services.store.save_account(nym, &account)?;

    if let Some(contact) = contact {
        services.activity.ensure_thread(nym, contact)?;
        services.activity.add_outgoing(nym, contact, tx)?;
    }
    Ok(())
}

/// Bind an allocated address to `contact` and migrate its thread history
pub fn assign_address(
    services: &Services,
    nym: &NymId,
    account_id: &AccountId,
    index: u32,
    subchain: Subchain,
    contact: &ContactId,
) -> Result<MigrationReport, BlockchainError> {
    let _guard = services.account_locks.lock(account_id);
    let mut account = services.load_account(nym, account_id)?;

    let address = account.address_mut(subchain, index)?;
    let previous = address.contact.replace(contact.clone());
    let incoming = address.incoming.clone();
    if previous.as_ref() != Some(contact) {
        account.bump_revision();
        services.store.save_account(nym, &account)?;
        log::info!(
            "Assigned {} address {} of account {} to contact {}",
            subchain,
            index,
            account_id,
            contact
        );
    }

    let mut report = MigrationReport {
        previous: previous.clone(),
        ..MigrationReport::default()
    };
    if let Err(e) = services.activity.ensure_thread(nym, contact) {
        log::warn!("Failed to open thread for contact {}: {}", contact, e);
        let reason = e.to_string();
        report.failed = incoming
            .into_iter()
            .map(|txid| (txid, reason.clone()))
            .collect();
        return Ok(report);
    }

    for txid in incoming {
        let outcome = match previous.as_ref() {
            Some(from) if from != contact => move_item(services, nym, from, contact, &txid),
            _ => thread_item(services, nym, contact, &txid),
        };
        match outcome {
            Ok(()) => report.migrated.push(txid),
            Err(e) => {
                log::warn!("Failed to thread {} under contact {}: {}", txid, contact, e);
                report.failed.push((txid, e.to_string()));
            }
        }
    }

    Ok(report)
}

/// Load a stored transaction
pub fn load_transaction(services: &Services, txid: &str) -> Result<Transaction, BlockchainError> {
    services
        .store
        .load_transaction(txid)?
        .ok_or_else(|| BlockchainError::TransactionNotFound(txid.to_string()))
}

fn move_item(
    services: &Services,
    nym: &NymId,
    from: &ContactId,
    to: &ContactId,
    txid: &str,
) -> Result<(), BlockchainError> {
    if services.activity.move_incoming(nym, from, to, txid)? {
        return Ok(());
    }
    // nothing under the previous contact, so thread it directly
    thread_item(services, nym, to, txid)
}

fn thread_item(
    services: &Services,
    nym: &NymId,
    contact: &ContactId,
    txid: &str,
) -> Result<(), BlockchainError> {
    let tx = load_transaction(services, txid)?;
    services.activity.add_incoming(nym, contact, &tx)
}
