//! Wallet-facing types shared by connectors, sessions and the stake flow

use serde::{Deserialize, Serialize};

/// Hex-encoded account address (`0x…`)
pub type Address = String;

/// Token amount in the smallest on-chain unit (wei for an 18-decimal token)
pub type AtomicAmount = u128;

pub const MAINNET_CHAIN_ID: u64 = 1;
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Network the wallet provider is currently connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub chain_id: u64,
    pub name: String,
}

impl NetworkInfo {
    pub fn new(chain_id: u64, name: impl Into<String>) -> Self {
        Self {
            chain_id,
            name: name.into(),
        }
    }

    /// Network info for a chain id, named after well-known chains.
    pub fn for_chain(chain_id: u64) -> Self {
        let name = match chain_id {
            MAINNET_CHAIN_ID => "mainnet",
            SEPOLIA_CHAIN_ID => "sepolia",
            _ => "unknown",
        };
        Self::new(chain_id, name)
    }

    pub fn is_mainnet(&self) -> bool {
        self.chain_id == MAINNET_CHAIN_ID
    }
}

/// Handle returned once a stake transaction has been accepted for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHandle {
    pub tx_hash: String,
    pub tier_id: String,
    pub amount_atomic: AtomicAmount,
}

/// ERC-20 metadata reported by the token contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    /// Total supply in atomic units
    pub total_supply: AtomicAmount,
}
