//! Token unit conversion and display formatting

use crate::errors::{Result, WalletError};
use crate::types::AtomicAmount;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Largest scale `rust_decimal` can represent
const MAX_DECIMALS: u32 = 28;

/// Convert a token amount to atomic units, truncating anything finer than
/// `decimals` places.
pub fn to_atomic(amount: f64, decimals: u32) -> Result<AtomicAmount> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(WalletError::InvalidUnits(format!(
            "cannot convert {amount} to atomic units"
        )));
    }
    let unit = unit_size(decimals)?;
    let value = Decimal::from_str(&amount.to_string())
        .map_err(|e| WalletError::InvalidUnits(format!("{amount}: {e}")))?;
    let overflow = || WalletError::InvalidUnits(format!("{amount} overflows atomic units"));

    // Whole tokens are scaled in u128; only the sub-unit part goes through
    // Decimal, where it stays below 10^decimals.
    let whole = value.trunc().to_u128().ok_or_else(overflow)?;
    let fraction = scale_factor(decimals)?
        .checked_mul(value.fract())
        .and_then(|scaled| scaled.trunc().to_u128())
        .ok_or_else(overflow)?;

    whole
        .checked_mul(unit)
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(overflow)
}

/// Convert atomic units to a token amount.
///
/// Sub-unit digits beyond what `Decimal` can hold next to a very large whole
/// part are rounded.
pub fn from_atomic(amount: AtomicAmount, decimals: u32) -> Result<Decimal> {
    let unit = unit_size(decimals)?;
    let too_large = || WalletError::InvalidUnits(format!("{amount} is too large"));

    let whole = i128::try_from(amount / unit)
        .ok()
        .and_then(|whole| Decimal::try_from_i128_with_scale(whole, 0).ok())
        .ok_or_else(too_large)?;
    // Below 10^28, so always within the 96-bit mantissa.
    let fraction = Decimal::try_from_i128_with_scale((amount % unit) as i128, decimals)
        .map_err(|e| WalletError::InvalidUnits(format!("{amount}: {e}")))?;

    whole
        .checked_add(fraction)
        .map(|d| d.normalize())
        .ok_or_else(too_large)
}

/// Atomic balance as an `f64` token amount, for the engine's balance check.
/// The result may round; exact comparisons belong in atomic units.
pub fn atomic_to_f64(amount: AtomicAmount, decimals: u32) -> Result<f64> {
    let unit = unit_size(decimals)?;
    Ok((amount / unit) as f64 + (amount % unit) as f64 / unit as f64)
}

/// One whole token in atomic units.
fn unit_size(decimals: u32) -> Result<AtomicAmount> {
    if decimals > MAX_DECIMALS {
        return Err(WalletError::InvalidUnits(format!(
            "unsupported token decimals {decimals}"
        )));
    }
    10u128
        .checked_pow(decimals)
        .ok_or_else(|| WalletError::InvalidUnits("scale overflow".into()))
}

fn scale_factor(decimals: u32) -> Result<Decimal> {
    if decimals > MAX_DECIMALS {
        return Err(WalletError::InvalidUnits(format!(
            "unsupported token decimals {decimals}"
        )));
    }
    let mut factor = Decimal::ONE;
    for _ in 0..decimals {
        factor = factor
            .checked_mul(Decimal::TEN)
            .ok_or_else(|| WalletError::InvalidUnits("scale overflow".into()))?;
    }
    Ok(factor)
}

/// Group thousands with commas and keep at most two fraction digits,
/// rounding half away from zero: `1234.567` -> `"1,234.57"`, `5.0` -> `"5"`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

/// [`format_amount`] for plain floating-point values. Non-finite input renders
/// as `"0"`.
pub fn format_f64(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    Decimal::from_str(&value.to_string())
        .map(format_amount)
        .unwrap_or_else(|_| format!("{value:.2}"))
}

/// Shorten an address for display: `0x1234...5678`.
pub fn format_address(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    if !address.is_ascii() || address.len() <= 10 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn atomic_round_trip_for_whole_tokens() {
        let atomic = to_atomic(1500.0, 18).unwrap();
        assert_eq!(atomic, 1_500_000_000_000_000_000_000);
        assert_eq!(from_atomic(atomic, 18).unwrap(), Decimal::from(1500));
    }

    #[test]
    fn fractional_amounts_truncate_below_precision() {
        assert_eq!(to_atomic(0.1, 18).unwrap(), 100_000_000_000_000_000);
        assert_eq!(to_atomic(1.23456, 2).unwrap(), 123);
        assert_eq!(to_atomic(0.0, 6).unwrap(), 0);
    }

    #[test]
    fn invalid_conversions_are_errors() {
        assert!(to_atomic(-1.0, 18).is_err());
        assert!(to_atomic(f64::NAN, 18).is_err());
        assert!(to_atomic(1.0, 40).is_err());
        assert!(from_atomic(1, 29).is_err());
    }

    #[test]
    fn balance_as_f64() {
        assert_eq!(atomic_to_f64(2_500_000_000_000_000_000, 18).unwrap(), 2.5);
        assert_eq!(atomic_to_f64(0, 18).unwrap(), 0.0);
        // One wei short of 1000 tokens is indistinguishable as f64.
        assert_eq!(atomic_to_f64(ONE_TOKEN * 1000 - 1, 18).unwrap(), 1000.0);
    }

    #[test]
    fn balances_beyond_decimal_mantissa_convert() {
        let holdings = 100_000_000_000 * ONE_TOKEN;
        assert!(holdings > 1u128 << 96);

        assert_eq!(
            from_atomic(holdings, 18).unwrap(),
            Decimal::from(100_000_000_000u64)
        );
        assert_eq!(atomic_to_f64(holdings, 18).unwrap(), 1e11);
        assert_eq!(to_atomic(1e11, 18).unwrap(), holdings);
        assert_eq!(to_atomic(100.0, 18).unwrap(), 100 * ONE_TOKEN);
        assert_eq!(
            format_amount(from_atomic(holdings + ONE_TOKEN / 4, 18).unwrap()),
            "100,000,000,000.25"
        );
    }

    #[test]
    fn amounts_past_u128_are_rejected() {
        assert!(to_atomic(1e30, 18).is_err());
        assert!(from_atomic(u128::MAX, 0).is_err());
    }

    #[test]
    fn amounts_format_like_locale_numbers() {
        assert_eq!(format_f64(1234.567), "1,234.57");
        assert_eq!(format_f64(1_000_000.0), "1,000,000");
        assert_eq!(format_f64(5.0), "5");
        assert_eq!(format_f64(0.125), "0.13");
        assert_eq!(format_f64(10.5), "10.5");
        assert_eq!(format_f64(999.999), "1,000");
        assert_eq!(format_f64(-1234.5), "-1,234.5");
        assert_eq!(format_f64(f64::NAN), "0");
    }

    #[test]
    fn addresses_are_shortened() {
        assert_eq!(
            format_address("0x38EA6b550DD33c9Cf9aC65721F71BbFb37c70DCa"),
            "0x38EA...0DCa"
        );
        assert_eq!(format_address(""), "");
        assert_eq!(format_address("0x1234"), "0x1234");
    }
}
