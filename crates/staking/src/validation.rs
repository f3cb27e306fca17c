use crate::amount::parse_amount;
use crate::errors::{Result, StakingError};
use crate::types::{AmountInput, StakeRequest, StakingTier};

/// Validate a stake before it is handed to a transaction submitter.
///
/// Checks run in a fixed order: tier presence, amount, tier minimum, then the
/// optional caller-supplied balance. On success the parsed amount is returned
/// unchanged.
pub fn validate_stake(
    amount: Option<&AmountInput>,
    tier: Option<&StakingTier>,
    available_balance: Option<f64>,
) -> Result<f64> {
    let tier = tier.ok_or(StakingError::NoTierSelected)?;
    let amount = parse_amount(amount)?;

    if amount < tier.min_amount {
        return Err(StakingError::BelowMinimum {
            tier: tier.name.clone(),
            minimum: tier.min_amount,
        });
    }

    if let Some(available) = available_balance {
        if available < amount {
            return Err(StakingError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
    }

    Ok(amount)
}

impl StakeRequest<'_> {
    /// Validate this request without a balance check.
    pub fn validate(&self) -> Result<f64> {
        validate_stake(self.amount.as_ref(), self.tier, None)
    }

    /// Validate this request against an available balance.
    pub fn validate_with_balance(&self, available: f64) -> Result<f64> {
        validate_stake(self.amount.as_ref(), self.tier, Some(available))
    }
}
