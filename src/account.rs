//! Account and address records
//!
//! An [`Account`] owns two append-only address sequences. The position of an
//! address in its sequence always equals its index, so lookups are a binary
//! search and the next index is simply the sequence length.

use serde::{Deserialize, Serialize};

use crate::chain::ChainType;
use crate::error::BlockchainError;
use crate::types::{AccountId, ContactId, HdPath, NymId, Standard, Subchain};

/// Exclusive upper bound of the address index space (non-hardened BIP32 children)
pub const MAX_INDEX_SPACE: u32 = 1 << 31;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainAddress {
    pub index: u32,
    pub address: String,
    pub label: String,
    pub contact: Option<ContactId>,
    pub incoming: Vec<String>,
}

impl BlockchainAddress {
    pub fn new(index: u32, address: String, label: impl Into<String>) -> Self {
        Self {
            index,
            address,
            label: label.into(),
            contact: None,
            incoming: Vec::new(),
        }
    }

    /// Record an incoming txid. Returns `false` if it was already recorded.
    pub fn add_incoming(&mut self, txid: &str) -> bool {
        if self.incoming.iter().any(|known| known == txid) {
            return false;
        }
        self.incoming.push(txid.to_string());
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub nym: NymId,
    pub chain: ChainType,
    pub standard: Standard,
    pub path: HdPath,
    pub revision: u64,
    pub internal_index: u32,
    pub external_index: u32,
    pub internal_addresses: Vec<BlockchainAddress>,
    pub external_addresses: Vec<BlockchainAddress>,
    pub outgoing: Vec<String>,
}

impl Account {
    pub fn new(
        id: AccountId,
        nym: NymId,
        chain: ChainType,
        standard: Standard,
        path: HdPath,
    ) -> Self {
        Self {
            id,
            nym,
            chain,
            standard,
            path,
            revision: 0,
            internal_index: 0,
            external_index: 0,
            internal_addresses: Vec::new(),
            external_addresses: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    /// Next unallocated index on `subchain`
    pub fn next_index(&self, subchain: Subchain) -> u32 {
        match subchain {
            Subchain::External => self.external_index,
            Subchain::Internal => self.internal_index,
        }
    }

    pub fn addresses(&self, subchain: Subchain) -> &[BlockchainAddress] {
        match subchain {
            Subchain::External => &self.external_addresses,
            Subchain::Internal => &self.internal_addresses,
        }
    }

    pub fn address(
        &self,
        subchain: Subchain,
        index: u32,
    ) -> Result<&BlockchainAddress, BlockchainError> {
        let position = self.position(subchain, index)?;
        Ok(&self.addresses(subchain)[position])
    }

    pub fn address_mut(
        &mut self,
        subchain: Subchain,
        index: u32,
    ) -> Result<&mut BlockchainAddress, BlockchainError> {
        let position = self.position(subchain, index)?;
        let addresses = match subchain {
            Subchain::External => &mut self.external_addresses,
            Subchain::Internal => &mut self.internal_addresses,
        };
        Ok(&mut addresses[position])
    }

    /// Append a new address at the next unallocated index of `subchain` and
    /// advance that index.
    pub fn push_address(
        &mut self,
        subchain: Subchain,
        address: String,
        label: &str,
    ) -> Result<BlockchainAddress, BlockchainError> {
        let (index, addresses) = match subchain {
            Subchain::External => (&mut self.external_index, &mut self.external_addresses),
            Subchain::Internal => (&mut self.internal_index, &mut self.internal_addresses),
        };
        if *index >= MAX_INDEX_SPACE {
            return Err(BlockchainError::IndexSpaceExhausted(subchain));
        }
        let allocated = BlockchainAddress::new(*index, address, label);
        addresses.push(allocated.clone());
        *index += 1;
        self.revision += 1;
        Ok(allocated)
    }

    /// Record an outgoing txid. Returns `false` if it was already recorded.
    pub fn add_outgoing(&mut self, txid: &str) -> bool {
        if self.outgoing.iter().any(|known| known == txid) {
            return false;
        }
        self.outgoing.push(txid.to_string());
        true
    }

    pub fn bump_revision(&mut self) {
        self.revision += 1;
    }

    fn position(&self, subchain: Subchain, index: u32) -> Result<usize, BlockchainError> {
        if index >= self.next_index(subchain) {
            return Err(BlockchainError::IndexNotAllocated { index, subchain });
        }
        self.addresses(subchain)
            .binary_search_by_key(&index, |address| address.index)
            .map_err(|_| BlockchainError::IndexNotAllocated { index, subchain })
    }
}
