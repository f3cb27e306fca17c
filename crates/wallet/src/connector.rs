//! External collaborator interfaces
//!
//! The reward engine never talks to a wallet. Presentation code reaches the
//! provider and the staking contract through these traits and passes the
//! results into the engine.

use crate::errors::{Result, WalletError};
use crate::types::{Address, AtomicAmount, NetworkInfo, TokenInfo, TransactionHandle};
use async_trait::async_trait;
use tracing::{info, warn};

/// Interface to a browser-style wallet provider holding the user's accounts.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Request account access, prompting the user if needed.
    async fn connect(&self) -> Result<Address>;

    /// Accounts already authorised for this site. Never prompts.
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// Token balance of `address` in atomic units.
    async fn get_balance(&self, address: &Address) -> Result<AtomicAmount>;

    async fn get_network(&self) -> Result<NetworkInfo>;

    /// Ask the provider to switch to `chain_id`.
    async fn switch_network(&self, chain_id: u64) -> Result<()>;

    /// Name, symbol, decimals and supply of the staked token.
    async fn token_info(&self) -> Result<TokenInfo>;

    /// Ask the provider to track `token` at `contract` in its asset list.
    /// Returns whether the user accepted.
    async fn watch_asset(&self, contract: &str, token: &TokenInfo) -> Result<bool>;
}

/// Interface to the staking contract.
#[async_trait]
pub trait StakeSubmitter: Send + Sync {
    async fn submit_stake(&self, amount: AtomicAmount, tier_id: &str)
        -> Result<TransactionHandle>;
}

/// Submitter used until a staking contract is deployed; every submission is
/// refused with [`WalletError::ContractNotDeployed`].
#[derive(Debug, Clone)]
pub struct UndeployedStakeSubmitter {
    contract_address: String,
}

impl UndeployedStakeSubmitter {
    pub fn new(contract_address: impl Into<String>) -> Self {
        Self {
            contract_address: contract_address.into(),
        }
    }
}

#[async_trait]
impl StakeSubmitter for UndeployedStakeSubmitter {
    async fn submit_stake(
        &self,
        amount: AtomicAmount,
        tier_id: &str,
    ) -> Result<TransactionHandle> {
        warn!(
            target: "wallet",
            "stake of {} atomic units in tier {} refused: staking contract not deployed",
            amount,
            tier_id
        );
        Err(WalletError::ContractNotDeployed {
            contract: self.contract_address.clone(),
        })
    }
}

/// Whether the connector reports `expected_chain_id`. Provider errors count
/// as "not on the expected network".
pub async fn is_correct_network(connector: &dyn WalletConnector, expected_chain_id: u64) -> bool {
    match connector.get_network().await {
        Ok(network) => network.chain_id == expected_chain_id,
        Err(err) => {
            warn!(target: "wallet", "failed to check network: {}", err);
            false
        }
    }
}

/// Look up the token's metadata and offer it to the wallet's asset list.
pub async fn watch_token(connector: &dyn WalletConnector, contract: &str) -> Result<TokenInfo> {
    let token = connector.token_info().await?;
    if connector.watch_asset(contract, &token).await? {
        info!(target: "wallet", "{} added to wallet assets", token.symbol);
    } else {
        info!(target: "wallet", "user declined to track {}", token.symbol);
    }
    Ok(token)
}
