//! In-memory wallet provider and stake submitter for tests and demos

use crate::connector::{StakeSubmitter, WalletConnector};
use crate::errors::{Result, WalletError};
use crate::types::{
    Address, AtomicAmount, NetworkInfo, TokenInfo, TransactionHandle, MAINNET_CHAIN_ID,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug)]
struct MockWalletState {
    accounts: Vec<Address>,
    authorised: bool,
    balances: HashMap<Address, AtomicAmount>,
    chain_id: u64,
    reject_connect: bool,
    fail_balance: bool,
    fail_network: bool,
    token: TokenInfo,
    decline_watch: bool,
    watched: Vec<(Address, String)>,
    calls: Vec<String>,
}

/// Scriptable [`WalletConnector`] that records every call it receives.
#[derive(Debug)]
pub struct MockWalletConnector {
    state: Mutex<MockWalletState>,
}

impl MockWalletConnector {
    /// A provider holding `accounts`, on mainnet, with nothing authorised yet.
    pub fn new(accounts: Vec<Address>) -> Self {
        Self {
            state: Mutex::new(MockWalletState {
                accounts,
                authorised: false,
                balances: HashMap::new(),
                chain_id: MAINNET_CHAIN_ID,
                reject_connect: false,
                fail_balance: false,
                fail_network: false,
                token: TokenInfo {
                    name: "ViewerValue Token".into(),
                    symbol: "VVT".into(),
                    decimals: 18,
                    total_supply: 0,
                },
                decline_watch: false,
                watched: Vec::new(),
                calls: Vec::new(),
            }),
        }
    }

    /// Mark the accounts as already authorised, as after a previous visit.
    pub fn authorised(self) -> Self {
        self.state.lock().authorised = true;
        self
    }

    pub fn with_balance(self, address: impl Into<Address>, balance: AtomicAmount) -> Self {
        self.set_balance(address, balance);
        self
    }

    pub fn with_chain_id(self, chain_id: u64) -> Self {
        self.state.lock().chain_id = chain_id;
        self
    }

    pub fn set_balance(&self, address: impl Into<Address>, balance: AtomicAmount) {
        self.state.lock().balances.insert(address.into(), balance);
    }

    pub fn set_accounts(&self, accounts: Vec<Address>) {
        self.state.lock().accounts = accounts;
    }

    pub fn reject_connect(&self, reject: bool) {
        self.state.lock().reject_connect = reject;
    }

    pub fn fail_balance(&self, fail: bool) {
        self.state.lock().fail_balance = fail;
    }

    pub fn fail_network(&self, fail: bool) {
        self.state.lock().fail_network = fail;
    }

    pub fn decline_watch(&self, decline: bool) {
        self.state.lock().decline_watch = decline;
    }

    /// `(contract, symbol)` pairs the user accepted into the asset list.
    pub fn watched_assets(&self) -> Vec<(Address, String)> {
        self.state.lock().watched.clone()
    }

    pub fn chain_id(&self) -> u64 {
        self.state.lock().chain_id
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }
}

#[async_trait]
impl WalletConnector for MockWalletConnector {
    async fn connect(&self) -> Result<Address> {
        let mut state = self.state.lock();
        state.calls.push("connect".into());
        if state.reject_connect {
            return Err(WalletError::ConnectionRejected("user rejected the request".into()));
        }
        let first = state
            .accounts
            .first()
            .cloned()
            .ok_or_else(|| WalletError::ProviderUnavailable("no accounts available".into()))?;
        state.authorised = true;
        Ok(first)
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        let mut state = self.state.lock();
        state.calls.push("accounts".into());
        if state.authorised {
            Ok(state.accounts.clone())
        } else {
            Ok(Vec::new())
        }
    }

    async fn get_balance(&self, address: &Address) -> Result<AtomicAmount> {
        let mut state = self.state.lock();
        state.calls.push(format!("get_balance:{address}"));
        if state.fail_balance {
            return Err(WalletError::RpcError("balanceOf call failed".into()));
        }
        Ok(state.balances.get(address).copied().unwrap_or(0))
    }

    async fn get_network(&self) -> Result<NetworkInfo> {
        let mut state = self.state.lock();
        state.calls.push("get_network".into());
        if state.fail_network {
            return Err(WalletError::RpcError("network lookup failed".into()));
        }
        Ok(NetworkInfo::for_chain(state.chain_id))
    }

    async fn switch_network(&self, chain_id: u64) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(format!("switch_network:{chain_id}"));
        state.chain_id = chain_id;
        Ok(())
    }

    async fn token_info(&self) -> Result<TokenInfo> {
        let mut state = self.state.lock();
        state.calls.push("token_info".into());
        if state.fail_network {
            return Err(WalletError::RpcError("token contract unreachable".into()));
        }
        Ok(state.token.clone())
    }

    async fn watch_asset(&self, contract: &str, token: &TokenInfo) -> Result<bool> {
        let mut state = self.state.lock();
        state.calls.push(format!("watch_asset:{contract}"));
        if state.decline_watch {
            return Ok(false);
        }
        state.watched.push((contract.to_string(), token.symbol.clone()));
        Ok(true)
    }
}

/// [`StakeSubmitter`] that accepts every stake and records it.
#[derive(Debug, Default)]
pub struct MockStakeSubmitter {
    submissions: Mutex<Vec<(AtomicAmount, String)>>,
}

impl MockStakeSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_submissions(&self) -> Vec<(AtomicAmount, String)> {
        self.submissions.lock().clone()
    }
}

#[async_trait]
impl StakeSubmitter for MockStakeSubmitter {
    async fn submit_stake(
        &self,
        amount: AtomicAmount,
        tier_id: &str,
    ) -> Result<TransactionHandle> {
        let mut submissions = self.submissions.lock();
        submissions.push((amount, tier_id.to_string()));
        Ok(TransactionHandle {
            tx_hash: format!("0x{:064x}", submissions.len()),
            tier_id: tier_id.to_string(),
            amount_atomic: amount,
        })
    }
}
