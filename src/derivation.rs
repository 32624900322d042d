//! Key derivation
//!
//! [`KeyDerivationProvider`] resolves an account path, subchain and index to
//! key material. [`SeedDeriver`] is the BIP32 implementation backed by BIP39
//! seeds, keyed by the fingerprint of each master key.

use bip39::Mnemonic;
use bitcoin::bip32::{ChildNumber, Xpriv};
use bitcoin::secp256k1::{PublicKey, Secp256k1, SecretKey};
use bitcoin::Network;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::BlockchainError;
use crate::types::{HdPath, Subchain, HARDENED};

/// Length of a compressed secp256k1 public key
pub const COMPRESSED_PUBKEY_LEN: usize = 33;

pub struct KeyMaterial {
    /// Serialized public key; must be the 33-byte compressed form
    pub public_key: Vec<u8>,
    pub secret_key: Option<SecretKey>,
}

pub trait KeyDerivationProvider: Send + Sync {
    /// Derive the key at `path / subchain / index`.
    ///
    /// Must be deterministic for fixed inputs.
    fn derive(
        &self,
        path: &HdPath,
        subchain: Subchain,
        index: u32,
    ) -> Result<KeyMaterial, BlockchainError>;
}

pub struct SeedDeriver {
    roots: RwLock<HashMap<String, Xpriv>>,
}

impl SeedDeriver {
    pub fn new() -> Self {
        Self {
            roots: RwLock::new(HashMap::new()),
        }
    }

    /// Register a BIP39 mnemonic (empty passphrase) and return its root id
    pub fn add_mnemonic(&self, words: &str) -> Result<String, BlockchainError> {
        let mnemonic = Mnemonic::parse(words)
            .map_err(|e| BlockchainError::Derivation(format!("Invalid mnemonic: {}", e)))?;
        self.add_seed(&mnemonic.to_seed(""))
    }

    /// Register a raw BIP32 seed and return its root id
    pub fn add_seed(&self, seed: &[u8]) -> Result<String, BlockchainError> {
        let secp = Secp256k1::new();
        let master = Xpriv::new_master(Network::Bitcoin, seed)
            .map_err(|e| BlockchainError::Derivation(e.to_string()))?;
        let root = format!("{:08x}", master.fingerprint(&secp));

        self.roots.write().insert(root.clone(), master);
        log::debug!("Registered HD root {}", root);
        Ok(root)
    }
}

impl Default for SeedDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDerivationProvider for SeedDeriver {
    fn derive(
        &self,
        path: &HdPath,
        subchain: Subchain,
        index: u32,
    ) -> Result<KeyMaterial, BlockchainError> {
        if index & HARDENED != 0 {
            return Err(BlockchainError::Derivation(format!(
                "index {} is outside the non-hardened range",
                index
            )));
        }

        let master = self
            .roots
            .read()
            .get(&path.root)
            .cloned()
            .ok_or_else(|| BlockchainError::Derivation(format!("Unknown HD root {}", path.root)))?;

        let mut children: Vec<ChildNumber> =
            path.children.iter().map(|c| ChildNumber::from(*c)).collect();
        children.push(ChildNumber::from(subchain.child()));
        children.push(ChildNumber::from(index));

        let secp = Secp256k1::new();
        let derived = master
            .derive_priv(&secp, &children)
            .map_err(|e| BlockchainError::Derivation(e.to_string()))?;
        let public_key = PublicKey::from_secret_key(&secp, &derived.private_key);

        Ok(KeyMaterial {
            public_key: public_key.serialize().to_vec(),
            secret_key: Some(derived.private_key),
        })
    }
}
