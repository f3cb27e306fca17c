//! Core types for the staking reward engine

use serde::{Deserialize, Serialize};

/// Short tier identifier, e.g. `"flexible"` or `"diamond"`
pub type TierId = String;

/// Fixed divisor used for daily projections (no leap-year adjustment)
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Fixed divisor used for monthly projections
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Percent denominator for APY and fee fields
pub const PERCENT_DENOM: f64 = 100.0;

/// A staking tier as defined by configuration.
///
/// Tiers are immutable once a catalog is loaded. `multiplier` and
/// `withdrawal_fee_percent` are informational and never folded into
/// [`crate::project_rewards`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingTier {
    pub id: TierId,
    pub name: String,
    /// Annual percentage yield, 12.5 meaning 12.5%
    pub apy_percent: f64,
    /// Inclusive lower bound on the stake quantity
    pub min_amount: f64,
    /// 0 means no lock
    pub lock_period_days: u32,
    pub multiplier: f64,
    pub withdrawal_fee_percent: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub benefits: Vec<String>,
}

impl StakingTier {
    /// Whether funds staked in this tier can be withdrawn at any time.
    pub fn is_flexible(&self) -> bool {
        self.lock_period_days == 0
    }

    /// APY as a fraction (12.5% -> 0.125).
    pub fn apy_fraction(&self) -> f64 {
        self.apy_percent / PERCENT_DENOM
    }

    /// Whether `amount` meets this tier's minimum.
    pub fn accepts(&self, amount: f64) -> bool {
        amount >= self.min_amount
    }
}

/// Raw stake amount as supplied by a caller: free text from an input field or
/// an already-numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        AmountInput::Text(value)
    }
}

/// A single stake calculation request. Built per interaction and discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct StakeRequest<'a> {
    pub amount: Option<AmountInput>,
    pub tier: Option<&'a StakingTier>,
}

impl<'a> StakeRequest<'a> {
    pub fn new(amount: impl Into<AmountInput>, tier: &'a StakingTier) -> Self {
        Self {
            amount: Some(amount.into()),
            tier: Some(tier),
        }
    }
}

/// Projected rewards for a stake. No rounding is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardProjection {
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
}

impl RewardProjection {
    pub const ZERO: RewardProjection = RewardProjection {
        daily: 0.0,
        monthly: 0.0,
        yearly: 0.0,
    };

    /// Build a projection from a yearly figure. Daily and monthly are both
    /// derived from `yearly`, never from each other.
    pub fn from_yearly(yearly: f64) -> Self {
        Self {
            daily: yearly / DAYS_PER_YEAR,
            monthly: yearly / MONTHS_PER_YEAR,
            yearly,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.yearly == 0.0 && self.monthly == 0.0 && self.daily == 0.0
    }
}

/// Withdrawal fee breakdown for an amount leaving a tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalQuote {
    pub amount: f64,
    pub fee: f64,
    pub net: f64,
}
