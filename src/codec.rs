//! Address hashing and rendering
//!
//! The address string for a public key is
//! `base58check(version_byte || ripemd160(sha256(pubkey)))`.

use bitcoin::base58;
use bitcoin::hashes::{ripemd160, sha256, Hash};

/// Length of the prefixed payload handed to [`AddressCodec::render`]
pub const PREIMAGE_LEN: usize = 21;

pub trait AddressCodec: Send + Sync {
    /// Wide hash of arbitrary data
    fn hash(&self, data: &[u8]) -> [u8; 32];

    /// Narrow hash of a wide digest
    fn hash160(&self, digest: &[u8; 32]) -> [u8; 20];

    /// Render version byte + 20-byte hash into a printable address
    fn render(&self, preimage: &[u8; PREIMAGE_LEN]) -> String;
}

/// SHA-256 / RIPEMD-160 / Base58Check, as used by every supported chain
#[derive(Debug, Clone, Copy, Default)]
pub struct Base58Codec;

impl AddressCodec for Base58Codec {
    fn hash(&self, data: &[u8]) -> [u8; 32] {
        sha256::Hash::hash(data).to_byte_array()
    }

    fn hash160(&self, digest: &[u8; 32]) -> [u8; 20] {
        ripemd160::Hash::hash(digest).to_byte_array()
    }

    fn render(&self, preimage: &[u8; PREIMAGE_LEN]) -> String {
        base58::encode_check(preimage)
    }
}

/// Build the prefixed payload for a chain's version byte
pub fn preimage(prefix: u8, hash: &[u8; 20]) -> [u8; PREIMAGE_LEN] {
    let mut out = [0u8; PREIMAGE_LEN];
    out[0] = prefix;
    out[1..].copy_from_slice(hash);
    out
}
