//! Dashboard session state
//!
//! Everything the dashboard remembers between interactions lives here, owned
//! by the presentation layer. The reward engine only ever sees values passed
//! in from this state.

use crate::connector::WalletConnector;
use crate::errors::Result;
use crate::types::{Address, AtomicAmount, NetworkInfo};
use crate::units::from_atomic;
use rust_decimal::Decimal;
use tracing::{info, warn};
use vvt_staking::{
    project_rewards, AmountInput, Catalog, RewardProjection, StakingError, StakingTier, TierId,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSession {
    address: Option<Address>,
    balance_atomic: AtomicAmount,
    network: Option<NetworkInfo>,
    selected_tier: Option<TierId>,
    amount_text: String,
    token_decimals: u32,
}

impl DashboardSession {
    pub fn new(token_decimals: u32) -> Self {
        Self {
            address: None,
            balance_atomic: 0,
            network: None,
            selected_tier: None,
            amount_text: String::new(),
            token_decimals,
        }
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn network(&self) -> Option<&NetworkInfo> {
        self.network.as_ref()
    }

    pub fn balance_atomic(&self) -> AtomicAmount {
        self.balance_atomic
    }

    pub fn token_decimals(&self) -> u32 {
        self.token_decimals
    }

    /// Balance in whole tokens.
    pub fn balance(&self) -> Result<Decimal> {
        from_atomic(self.balance_atomic, self.token_decimals)
    }

    pub fn selected_tier_id(&self) -> Option<&str> {
        self.selected_tier.as_deref()
    }

    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    pub fn amount_input(&self) -> AmountInput {
        AmountInput::Text(self.amount_text.clone())
    }

    /// Connect through the provider, then load network and balance.
    ///
    /// A failed network lookup leaves the network unset; a failed balance
    /// read leaves a zero balance. Neither fails the connection.
    pub async fn connect(&mut self, connector: &dyn WalletConnector) -> Result<Address> {
        let address = connector.connect().await?;
        self.attach(address.clone(), connector).await;
        info!(target: "wallet", "wallet connected: {}", address);
        Ok(address)
    }

    /// Reattach to an already-authorised account without prompting.
    /// Returns whether the session ended up connected.
    pub async fn restore(&mut self, connector: &dyn WalletConnector) -> Result<bool> {
        let accounts = connector.accounts().await?;
        match accounts.into_iter().next() {
            Some(address) => {
                self.attach(address, connector).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Forget the wallet. Tier and amount selections are kept.
    pub fn disconnect(&mut self) {
        if let Some(address) = self.address.take() {
            info!(target: "wallet", "wallet disconnected: {}", address);
        }
        self.balance_atomic = 0;
        self.network = None;
    }

    /// Apply an account-change notification from the provider.
    pub async fn accounts_changed(
        &mut self,
        accounts: &[Address],
        connector: &dyn WalletConnector,
    ) {
        match accounts.first() {
            None => self.disconnect(),
            Some(address) => {
                info!(target: "wallet", "active account changed to {}", address);
                self.address = Some(address.clone());
                self.refresh_balance(connector).await;
            }
        }
    }

    /// Apply a chain-change notification: re-read network and balance.
    pub async fn chain_changed(&mut self, connector: &dyn WalletConnector) {
        if !self.is_connected() {
            return;
        }
        self.refresh_network(connector).await;
        if let Some(network) = self.network.as_ref() {
            info!(target: "wallet", "network changed to {} ({})", network.name, network.chain_id);
        }
        self.refresh_balance(connector).await;
    }

    /// Re-read the token balance. Failures degrade to a zero balance.
    pub async fn refresh_balance(&mut self, connector: &dyn WalletConnector) {
        let Some(address) = self.address.as_ref() else {
            return;
        };
        self.balance_atomic = match connector.get_balance(address).await {
            Ok(balance) => balance,
            Err(err) => {
                warn!(target: "wallet", "failed to update balance for {}: {}", address, err);
                0
            }
        };
    }

    /// Pick a tier from `catalog` by id.
    pub fn select_tier<'a>(
        &mut self,
        catalog: &'a Catalog,
        tier_id: &str,
    ) -> std::result::Result<&'a StakingTier, StakingError> {
        let tier = catalog.select(tier_id)?;
        self.selected_tier = Some(tier.id.clone());
        Ok(tier)
    }

    pub fn clear_tier(&mut self) {
        self.selected_tier = None;
    }

    /// The selected tier resolved against `catalog`.
    pub fn selected_tier<'a>(
        &self,
        catalog: &'a Catalog,
    ) -> std::result::Result<Option<&'a StakingTier>, StakingError> {
        self.selected_tier
            .as_deref()
            .map(|id| catalog.select(id))
            .transpose()
    }

    pub fn set_amount(&mut self, text: impl Into<String>) {
        self.amount_text = text.into();
    }

    /// Projected rewards for the current amount and tier; zero whenever either
    /// is missing or unusable.
    pub fn projection(&self, catalog: &Catalog) -> RewardProjection {
        let tier = self.selected_tier(catalog).ok().flatten();
        let amount = self.amount_text.trim().parse::<f64>().ok();
        project_rewards(amount, tier)
    }

    async fn attach(&mut self, address: Address, connector: &dyn WalletConnector) {
        self.address = Some(address);
        self.refresh_network(connector).await;
        self.refresh_balance(connector).await;
    }

    async fn refresh_network(&mut self, connector: &dyn WalletConnector) {
        self.network = match connector.get_network().await {
            Ok(network) => Some(network),
            Err(err) => {
                warn!(target: "wallet", "failed to get network info: {}", err);
                None
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockWalletConnector;
    use crate::types::{MAINNET_CHAIN_ID, SEPOLIA_CHAIN_ID};
    use vvt_staking::reference_catalog;

    const ALICE: &str = "0x1111111111111111111111111111111111111111";
    const BOB: &str = "0x2222222222222222222222222222222222222222";
    const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

    #[tokio::test]
    async fn connect_loads_network_and_balance() {
        let wallet =
            MockWalletConnector::new(vec![ALICE.into()]).with_balance(ALICE, 250 * ONE_TOKEN);
        let mut session = DashboardSession::new(18);

        assert_eq!(session.connect(&wallet).await.unwrap(), ALICE);
        assert!(session.is_connected());
        assert_eq!(session.network().unwrap().chain_id, 1);
        assert_eq!(session.balance().unwrap(), Decimal::from(250));
    }

    #[tokio::test]
    async fn balance_failure_degrades_to_zero() {
        let wallet = MockWalletConnector::new(vec![ALICE.into()]).with_balance(ALICE, ONE_TOKEN);
        wallet.fail_balance(true);
        wallet.fail_network(true);
        let mut session = DashboardSession::new(18);

        session.connect(&wallet).await.unwrap();
        assert_eq!(session.balance_atomic(), 0);
        assert!(session.network().is_none());
    }

    #[tokio::test]
    async fn restore_only_uses_authorised_accounts() {
        let fresh = MockWalletConnector::new(vec![ALICE.into()]);
        let mut session = DashboardSession::new(18);
        assert!(!session.restore(&fresh).await.unwrap());
        assert!(!fresh.get_calls().contains(&"connect".to_string()));

        let returning = MockWalletConnector::new(vec![ALICE.into()]).authorised();
        assert!(session.restore(&returning).await.unwrap());
        assert_eq!(session.address().map(String::as_str), Some(ALICE));
    }

    #[tokio::test]
    async fn account_changes_switch_or_disconnect() {
        let wallet = MockWalletConnector::new(vec![ALICE.into(), BOB.into()])
            .with_balance(ALICE, ONE_TOKEN)
            .with_balance(BOB, 3 * ONE_TOKEN);
        let mut session = DashboardSession::new(18);
        session.connect(&wallet).await.unwrap();
        session.set_amount("500");

        session.accounts_changed(&[BOB.into()], &wallet).await;
        assert_eq!(session.address().map(String::as_str), Some(BOB));
        assert_eq!(session.balance_atomic(), 3 * ONE_TOKEN);

        session.accounts_changed(&[], &wallet).await;
        assert!(!session.is_connected());
        assert_eq!(session.balance_atomic(), 0);
        assert!(session.network().is_none());
        assert_eq!(session.amount_text(), "500");
    }

    #[tokio::test]
    async fn chain_change_rereads_network_and_balance() {
        let wallet = MockWalletConnector::new(vec![ALICE.into()])
            .with_balance(ALICE, ONE_TOKEN)
            .with_chain_id(SEPOLIA_CHAIN_ID);
        let mut session = DashboardSession::new(18);

        session.chain_changed(&wallet).await;
        assert!(session.network().is_none());

        session.connect(&wallet).await.unwrap();
        assert_eq!(session.network().unwrap().chain_id, SEPOLIA_CHAIN_ID);

        wallet.switch_network(MAINNET_CHAIN_ID).await.unwrap();
        wallet.set_balance(ALICE, 7 * ONE_TOKEN);
        wallet.clear_calls();
        session.chain_changed(&wallet).await;

        assert_eq!(session.network(), Some(&NetworkInfo::for_chain(MAINNET_CHAIN_ID)));
        assert_eq!(session.balance_atomic(), 7 * ONE_TOKEN);
        assert_eq!(
            wallet.get_calls(),
            vec!["get_network".to_string(), format!("get_balance:{ALICE}")]
        );
    }

    #[tokio::test]
    async fn restore_picks_first_account_after_reorder() {
        let wallet = MockWalletConnector::new(vec![ALICE.into(), BOB.into()]).authorised();
        wallet.set_accounts(vec![BOB.into(), ALICE.into()]);
        let mut session = DashboardSession::new(18);

        assert!(session.restore(&wallet).await.unwrap());
        assert_eq!(session.address().map(String::as_str), Some(BOB));
    }

    #[test]
    fn projection_follows_selection() {
        let catalog = reference_catalog();
        let mut session = DashboardSession::new(18);
        assert!(session.projection(&catalog).is_zero());

        session.select_tier(&catalog, "medium").unwrap();
        session.set_amount("1000");
        assert_eq!(session.projection(&catalog).yearly, 125.0);

        session.set_amount("not a number");
        assert!(session.projection(&catalog).is_zero());

        assert!(session.select_tier(&catalog, "platinum").is_err());
        assert_eq!(session.selected_tier_id(), Some("medium"));

        session.clear_tier();
        session.set_amount("1000");
        assert!(session.projection(&catalog).is_zero());
    }
}
