//! Identifiers, HD paths and derivation enums shared across the crate

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::chain::ChainType;

/// Bit marking a BIP32 child index as hardened
pub const HARDENED: u32 = 0x8000_0000;

/// BIP43 purpose for BIP44 HD wallets
pub const BIP44_PURPOSE: u32 = 44;

/// Returns `index` with the hardened bit set.
pub fn hardened(index: u32) -> u32 {
    index | HARDENED
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

string_id!(
    /// Identity owning a set of accounts
    NymId
);
string_id!(
    /// Counterparty an address can be bound to
    ContactId
);
string_id!(
    /// Hex SHA-256 over an account's chain and id-path
    AccountId
);

impl AccountId {
    /// Derive the account identifier for `chain` and `id_path`.
    ///
    /// Pure function of its inputs: re-deriving the same path always yields
    /// the same id.
    pub fn derive(chain: ChainType, id_path: &HdPath) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(chain.code().to_be_bytes());
        hasher.update((id_path.root.len() as u32).to_be_bytes());
        hasher.update(id_path.root.as_bytes());
        for child in &id_path.children {
            hasher.update(child.to_be_bytes());
        }
        Self(hex::encode(hasher.finalize()))
    }
}

/// Receiving (external) or change (internal) address sequence of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subchain {
    External,
    Internal,
}

impl Subchain {
    /// BIP32 child index selecting this subchain below the account path
    pub fn child(self) -> u32 {
        match self {
            Self::External => 0,
            Self::Internal => 1,
        }
    }
}

impl fmt::Display for Subchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::External => f.write_str("external"),
            Self::Internal => f.write_str("internal"),
        }
    }
}

/// Account path construction scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standard {
    /// Single hardened account child below the root
    Bip32,
    /// purpose' / coin_type' / account
    Bip44,
}

/// HD path: the fingerprint of the root seed plus raw BIP32 child indices
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HdPath {
    pub root: String,
    pub children: Vec<u32>,
}

impl HdPath {
    pub fn new(root: impl Into<String>, children: Vec<u32>) -> Self {
        Self {
            root: root.into(),
            children,
        }
    }

    pub fn child(&self, position: usize) -> Option<u32> {
        self.children.get(position).copied()
    }

    pub fn with_child(mut self, child: u32) -> Self {
        self.children.push(child);
        self
    }

    pub fn to_derivation_path(&self) -> bitcoin::bip32::DerivationPath {
        self.children
            .iter()
            .map(|child| bitcoin::bip32::ChildNumber::from(*child))
            .collect::<Vec<_>>()
            .into()
    }
}

impl fmt::Display for HdPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]m", self.root)?;
        for child in &self.children {
            if child & HARDENED != 0 {
                write!(f, "/{}h", child & !HARDENED)?;
            } else {
                write!(f, "/{}", child)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::bip32::ChildNumber;

    #[test]
    fn hd_path_display_marks_hardened_children() {
        let path = HdPath::new("73c5da0a", vec![hardened(44), hardened(0), 3]);
        assert_eq!(path.to_string(), "[73c5da0a]m/44h/0h/3");

        let derivation = path.to_derivation_path();
        let children: &[ChildNumber] = derivation.as_ref();
        assert_eq!(children[0], ChildNumber::Hardened { index: 44 });
        assert_eq!(children[2], ChildNumber::Normal { index: 3 });
    }

    #[test]
    fn account_id_is_deterministic() {
        let path = HdPath::new("73c5da0a", vec![hardened(44), hardened(0), hardened(0)]);
        let first = AccountId::derive(ChainType::Bitcoin, &path);
        let second = AccountId::derive(ChainType::Bitcoin, &path.clone());
        assert_eq!(first, second);
        assert_eq!(first.as_str().len(), 64);
    }

    #[test]
    fn account_id_separates_chains_and_paths() {
        let path = HdPath::new("73c5da0a", vec![hardened(0)]);
        let btc = AccountId::derive(ChainType::Bitcoin, &path);
        let ltc = AccountId::derive(ChainType::Litecoin, &path);
        let other = AccountId::derive(ChainType::Bitcoin, &path.clone().with_child(1));
        assert_ne!(btc, ltc);
        assert_ne!(btc, other);
    }

    #[test]
    fn subchain_children() {
        assert_eq!(Subchain::External.child(), 0);
        assert_eq!(Subchain::Internal.child(), 1);
    }
}
