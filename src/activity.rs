//! Contact activity threads
//!
//! Transactions involving an address bound to a contact are threaded under
//! that contact. [`ActivityService`] is the seam; [`MemoryActivity`] keeps the
//! threads in memory and is what the tests observe.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::BlockchainError;
use crate::transaction::Transaction;
use crate::types::{ContactId, NymId};

pub trait ActivityService: Send + Sync {
    /// Create the (nym, contact) thread if it does not exist yet.
    fn ensure_thread(&self, nym: &NymId, contact: &ContactId) -> Result<(), BlockchainError>;

    /// Add an incoming item. Adding a txid already in the thread is a no-op.
    fn add_incoming(
        &self,
        nym: &NymId,
        contact: &ContactId,
        tx: &Transaction,
    ) -> Result<(), BlockchainError>;

    /// Add an outgoing item. Adding a txid already in the thread is a no-op.
    fn add_outgoing(
        &self,
        nym: &NymId,
        contact: &ContactId,
        tx: &Transaction,
    ) -> Result<(), BlockchainError>;

    /// Move an incoming item between threads.
    ///
    /// Returns `false` when `from` holds no incoming item for `txid`.
    fn move_incoming(
        &self,
        nym: &NymId,
        from: &ContactId,
        to: &ContactId,
        txid: &str,
    ) -> Result<bool, BlockchainError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadItem {
    pub txid: String,
    pub direction: Direction,
}

type ThreadKey = (NymId, ContactId);

#[derive(Default)]
pub struct MemoryActivity {
    threads: RwLock<HashMap<ThreadKey, Vec<ThreadItem>>>,
}

impl MemoryActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items of a thread, or `None` if the thread was never created
    pub fn thread(&self, nym: &NymId, contact: &ContactId) -> Option<Vec<ThreadItem>> {
        self.threads
            .read()
            .get(&(nym.clone(), contact.clone()))
            .cloned()
    }

    fn add(&self, nym: &NymId, contact: &ContactId, txid: &str, direction: Direction) {
        let mut threads = self.threads.write();
        let items = threads.entry((nym.clone(), contact.clone())).or_default();
        let present = items
            .iter()
            .any(|item| item.txid == txid && item.direction == direction);
        if !present {
            items.push(ThreadItem {
                txid: txid.to_string(),
                direction,
            });
        }
    }
}

impl ActivityService for MemoryActivity {
    fn ensure_thread(&self, nym: &NymId, contact: &ContactId) -> Result<(), BlockchainError> {
        self.threads
            .write()
            .entry((nym.clone(), contact.clone()))
            .or_default();
        Ok(())
    }

    fn add_incoming(
        &self,
        nym: &NymId,
        contact: &ContactId,
        tx: &Transaction,
    ) -> Result<(), BlockchainError> {
        self.add(nym, contact, &tx.txid, Direction::Incoming);
        Ok(())
    }

    fn add_outgoing(
        &self,
        nym: &NymId,
        contact: &ContactId,
        tx: &Transaction,
    ) -> Result<(), BlockchainError> {
        self.add(nym, contact, &tx.txid, Direction::Outgoing);
        Ok(())
    }

    fn move_incoming(
        &self,
        nym: &NymId,
        from: &ContactId,
        to: &ContactId,
        txid: &str,
    ) -> Result<bool, BlockchainError> {
        {
            let mut threads = self.threads.write();
            let Some(items) = threads.get_mut(&(nym.clone(), from.clone())) else {
                return Ok(false);
            };
            let before = items.len();
            items.retain(|item| !(item.txid == txid && item.direction == Direction::Incoming));
            if items.len() == before {
                return Ok(false);
            }
        }

        self.add(nym, to, txid, Direction::Incoming);
        Ok(true)
    }
}
