//! Supported chains and their network constants
//!
//! Chain dispatch is an exhaustive match over a closed enumeration: every
//! supported chain has a P2PKH version byte and a BIP44 coin type, and parsing
//! an unknown ticker yields a typed error instead of a silent fallback.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BlockchainError;

/// BIP44 coin type shared by every test network.
pub const TESTNET_COIN_TYPE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainType {
    Bitcoin,
    BitcoinTestnet,
    Litecoin,
    LitecoinTestnet,
    Dogecoin,
    DogecoinTestnet,
    Dash,
    DashTestnet,
    BitcoinCash,
    BitcoinCashTestnet,
}

impl ChainType {
    pub const ALL: [ChainType; 10] = [
        ChainType::Bitcoin,
        ChainType::BitcoinTestnet,
        ChainType::Litecoin,
        ChainType::LitecoinTestnet,
        ChainType::Dogecoin,
        ChainType::DogecoinTestnet,
        ChainType::Dash,
        ChainType::DashTestnet,
        ChainType::BitcoinCash,
        ChainType::BitcoinCashTestnet,
    ];

    /// Network version byte prepended to a public key hash (P2PKH)
    pub fn p2pkh_prefix(self) -> u8 {
        match self {
            Self::Bitcoin | Self::BitcoinCash => 0x00,
            Self::BitcoinTestnet | Self::LitecoinTestnet | Self::BitcoinCashTestnet => 0x6f,
            Self::Litecoin => 0x30,
            Self::Dogecoin => 0x1e,
            Self::DogecoinTestnet => 0x71,
            Self::Dash => 0x4c,
            Self::DashTestnet => 0x8c,
        }
    }

    /// SLIP-44 coin type used as the second BIP44 path component
    pub fn bip44_coin_type(self) -> u32 {
        match self {
            Self::Bitcoin => 0,
            Self::Litecoin => 2,
            Self::Dogecoin => 3,
            Self::Dash => 5,
            Self::BitcoinCash => 145,
            Self::BitcoinTestnet
            | Self::LitecoinTestnet
            | Self::DogecoinTestnet
            | Self::DashTestnet
            | Self::BitcoinCashTestnet => TESTNET_COIN_TYPE,
        }
    }

    pub fn is_testnet(self) -> bool {
        matches!(
            self,
            Self::BitcoinTestnet
                | Self::LitecoinTestnet
                | Self::DogecoinTestnet
                | Self::DashTestnet
                | Self::BitcoinCashTestnet
        )
    }

    pub fn ticker(self) -> &'static str {
        match self {
            Self::Bitcoin => "btc",
            Self::BitcoinTestnet => "tnbtc",
            Self::Litecoin => "ltc",
            Self::LitecoinTestnet => "tnltc",
            Self::Dogecoin => "doge",
            Self::DogecoinTestnet => "tndoge",
            Self::Dash => "dash",
            Self::DashTestnet => "tndash",
            Self::BitcoinCash => "bch",
            Self::BitcoinCashTestnet => "tnbch",
        }
    }

    /// Stable numeric code mixed into account identifiers.
    ///
    /// Changing these values changes every derived account id.
    pub(crate) fn code(self) -> u32 {
        match self {
            Self::Bitcoin => 1,
            Self::BitcoinTestnet => 2,
            Self::Litecoin => 3,
            Self::LitecoinTestnet => 4,
            Self::Dogecoin => 5,
            Self::DogecoinTestnet => 6,
            Self::Dash => 7,
            Self::DashTestnet => 8,
            Self::BitcoinCash => 9,
            Self::BitcoinCashTestnet => 10,
        }
    }
}

impl fmt::Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

impl FromStr for ChainType {
    type Err = BlockchainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|chain| chain.ticker() == wanted)
            .ok_or_else(|| BlockchainError::UnsupportedChain(s.to_string()))
    }
}
