//! Stake submission flow
//!
//! Composes wallet I/O with the pure reward engine: validate against the
//! session's balance, confirm the network, convert units, submit.

use crate::connector::{StakeSubmitter, WalletConnector};
use crate::errors::{Result, WalletError};
use crate::session::DashboardSession;
use crate::types::TransactionHandle;
use crate::units::{atomic_to_f64, to_atomic};
use std::sync::Arc;
use tracing::{debug, info};
use vvt_staking::{validate_stake, Catalog, StakingError};

pub struct StakeFlow {
    connector: Arc<dyn WalletConnector>,
    submitter: Arc<dyn StakeSubmitter>,
    expected_chain_id: u64,
}

impl StakeFlow {
    pub fn new(
        connector: Arc<dyn WalletConnector>,
        submitter: Arc<dyn StakeSubmitter>,
        expected_chain_id: u64,
    ) -> Self {
        Self {
            connector,
            submitter,
            expected_chain_id,
        }
    }

    pub fn connector(&self) -> &dyn WalletConnector {
        self.connector.as_ref()
    }

    pub fn expected_chain_id(&self) -> u64 {
        self.expected_chain_id
    }

    /// Submit the session's pending stake.
    pub async fn stake(
        &self,
        session: &DashboardSession,
        catalog: &Catalog,
    ) -> Result<TransactionHandle> {
        if !session.is_connected() {
            return Err(WalletError::NotConnected);
        }
        let tier = session
            .selected_tier(catalog)?
            .ok_or(StakingError::NoTierSelected)?;

        let decimals = session.token_decimals();
        let available = atomic_to_f64(session.balance_atomic(), decimals)?;
        let amount = validate_stake(Some(&session.amount_input()), Some(tier), Some(available))?;
        debug!(
            target: "wallet",
            "stake of {} validated for tier {} (available {})",
            amount,
            tier.id,
            available
        );

        // The f64 check above can round a balance up to the requested amount.
        let amount_atomic = to_atomic(amount, decimals)?;
        if amount_atomic > session.balance_atomic() {
            return Err(StakingError::InsufficientBalance {
                requested: amount,
                available,
            }
            .into());
        }

        let network = self.connector.get_network().await?;
        if network.chain_id != self.expected_chain_id {
            return Err(WalletError::WrongNetwork {
                expected: self.expected_chain_id,
                actual: network.chain_id,
            });
        }

        let handle = self.submitter.submit_stake(amount_atomic, &tier.id).await?;
        info!(
            target: "wallet",
            "stake submitted: {} in tier {} (tx {})",
            amount,
            tier.id,
            handle.tx_hash
        );
        Ok(handle)
    }

    /// Ask the provider to move to the expected chain if it is elsewhere.
    pub async fn ensure_network(&self) -> Result<()> {
        let network = self.connector.get_network().await?;
        if network.chain_id != self.expected_chain_id {
            info!(
                target: "wallet",
                "switching network from {} to {}",
                network.chain_id,
                self.expected_chain_id
            );
            self.connector.switch_network(self.expected_chain_id).await?;
        }
        Ok(())
    }
}
