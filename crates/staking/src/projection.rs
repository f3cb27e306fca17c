use crate::types::{RewardProjection, StakingTier, WithdrawalQuote, PERCENT_DENOM};

/// Project simple (non-compounding) rewards for `amount` staked in `tier`.
///
/// Returns [`RewardProjection::ZERO`] when either input is absent or the amount
/// is zero, negative or not finite, so callers can render it unconditionally.
///
/// `yearly = amount * (apy_percent / 100)`, `monthly = yearly / 12`,
/// `daily = yearly / 365`. The tier multiplier is not applied.
pub fn project_rewards(amount: Option<f64>, tier: Option<&StakingTier>) -> RewardProjection {
    match (usable_amount(amount), tier) {
        (Some(amount), Some(tier)) => {
            RewardProjection::from_yearly(amount * (tier.apy_percent / PERCENT_DENOM))
        }
        _ => RewardProjection::ZERO,
    }
}

/// Multiplier-adjusted projection: the reference yearly reward scaled by
/// `tier.multiplier`, with daily and monthly derived from that yearly figure.
pub fn project_boosted_rewards(
    amount: Option<f64>,
    tier: Option<&StakingTier>,
) -> RewardProjection {
    match tier {
        Some(t) => {
            let base = project_rewards(amount, tier);
            if base.is_zero() {
                base
            } else {
                RewardProjection::from_yearly(base.yearly * t.multiplier)
            }
        }
        None => RewardProjection::ZERO,
    }
}

/// Fee charged when withdrawing `amount` from `tier`.
pub fn withdrawal_fee(amount: f64, tier: &StakingTier) -> f64 {
    match usable_amount(Some(amount)) {
        Some(amount) => amount * (tier.withdrawal_fee_percent / PERCENT_DENOM),
        None => 0.0,
    }
}

/// Amount received after the tier's withdrawal fee.
pub fn net_withdrawal(amount: f64, tier: &StakingTier) -> f64 {
    quote_withdrawal(amount, tier).net
}

/// Full withdrawal breakdown for display.
pub fn quote_withdrawal(amount: f64, tier: &StakingTier) -> WithdrawalQuote {
    let amount = usable_amount(Some(amount)).unwrap_or(0.0);
    let fee = withdrawal_fee(amount, tier);
    WithdrawalQuote {
        amount,
        fee,
        net: amount - fee,
    }
}

fn usable_amount(amount: Option<f64>) -> Option<f64> {
    amount.filter(|a| a.is_finite() && *a > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::reference_catalog;

    fn tier(id: &str) -> StakingTier {
        reference_catalog().select(id).unwrap().clone()
    }

    #[test]
    fn medium_tier_thousand() {
        let medium = tier("medium");
        let p = project_rewards(Some(1000.0), Some(&medium));
        assert_eq!(p.yearly, 125.0);
        assert!((p.monthly - 10.4167).abs() < 1e-4);
        assert!((p.daily - 0.3425).abs() < 1e-4);
    }

    #[test]
    fn diamond_tier_five_thousand() {
        let diamond = tier("diamond");
        let p = project_rewards(Some(5000.0), Some(&diamond));
        assert!((p.yearly - 900.0).abs() < 1e-9);
        assert!((p.monthly - 75.0).abs() < 1e-9);
        assert!((p.daily - 2.4658).abs() < 1e-4);
    }

    #[test]
    fn daily_and_monthly_come_from_yearly() {
        let short = tier("short");
        let p = project_rewards(Some(777.77), Some(&short));
        assert_eq!(p.monthly, p.yearly / 12.0);
        assert_eq!(p.daily, p.yearly / 365.0);
    }

    #[test]
    fn absent_inputs_project_zero() {
        let flexible = tier("flexible");
        assert!(project_rewards(None, Some(&flexible)).is_zero());
        assert!(project_rewards(Some(0.0), Some(&flexible)).is_zero());
        assert!(project_rewards(Some(1000.0), None).is_zero());
        assert!(project_rewards(Some(-10.0), Some(&flexible)).is_zero());
        assert!(project_rewards(Some(f64::NAN), Some(&flexible)).is_zero());
    }

    #[test]
    fn boosted_projection_applies_multiplier() {
        let diamond = tier("diamond");
        let base = project_rewards(Some(5000.0), Some(&diamond));
        let boosted = project_boosted_rewards(Some(5000.0), Some(&diamond));
        assert_eq!(boosted.yearly, base.yearly * 2.0);
        assert_eq!(boosted.daily, boosted.yearly / 365.0);
        assert!(project_boosted_rewards(Some(5000.0), None).is_zero());
    }

    #[test]
    fn withdrawal_fee_follows_tier_percent() {
        let flexible = tier("flexible");
        assert_eq!(withdrawal_fee(1000.0, &flexible), 20.0);
        assert_eq!(net_withdrawal(1000.0, &flexible), 980.0);

        let diamond = tier("diamond");
        let quote = quote_withdrawal(5000.0, &diamond);
        assert_eq!(quote.fee, 0.0);
        assert_eq!(quote.net, 5000.0);

        assert_eq!(withdrawal_fee(-1.0, &flexible), 0.0);
    }
}
