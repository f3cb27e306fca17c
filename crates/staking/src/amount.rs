use crate::errors::{Result, StakingError};
use crate::types::AmountInput;

/// Parse a raw stake amount into a finite, strictly positive number.
///
/// Text is trimmed and must be a complete decimal literal. Absent input, empty
/// text, unparseable text, NaN, infinities, zero and negatives are all
/// rejected with [`StakingError::InvalidAmount`].
pub fn parse_amount(input: Option<&AmountInput>) -> Result<f64> {
    let value = match input {
        None => return Err(StakingError::InvalidAmount("amount is required".into())),
        Some(AmountInput::Number(value)) => *value,
        Some(AmountInput::Text(text)) => parse_text(text)?,
    };

    if !value.is_finite() {
        return Err(StakingError::InvalidAmount(format!(
            "amount must be finite, got {value}"
        )));
    }
    if value <= 0.0 {
        return Err(StakingError::InvalidAmount(format!(
            "amount must be greater than zero, got {value}"
        )));
    }

    Ok(value)
}

fn parse_text(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StakingError::InvalidAmount("amount is required".into()));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| StakingError::InvalidAmount(format!("'{trimmed}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> AmountInput {
        AmountInput::Text(s.to_string())
    }

    #[test]
    fn parses_text_and_numbers() {
        assert_eq!(parse_amount(Some(&text("100"))).unwrap(), 100.0);
        assert_eq!(parse_amount(Some(&text("  42.5 "))).unwrap(), 42.5);
        assert_eq!(parse_amount(Some(&text("1e3"))).unwrap(), 1000.0);
        assert_eq!(parse_amount(Some(&AmountInput::Number(7.25))).unwrap(), 7.25);
    }

    #[test]
    fn rejects_missing_and_empty() {
        assert!(matches!(
            parse_amount(None),
            Err(StakingError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_amount(Some(&text(""))),
            Err(StakingError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_amount(Some(&text("   "))),
            Err(StakingError::InvalidAmount(_))
        ));
    }

    #[test]
    fn rejects_non_positive_and_non_finite() {
        for bad in ["0", "-5", "abc", "100abc", "inf", "NaN", "-0.0"] {
            assert!(
                matches!(parse_amount(Some(&text(bad))), Err(StakingError::InvalidAmount(_))),
                "{bad} should be rejected"
            );
        }
        assert!(parse_amount(Some(&AmountInput::Number(f64::NAN))).is_err());
        assert!(parse_amount(Some(&AmountInput::Number(f64::INFINITY))).is_err());
        assert!(parse_amount(Some(&AmountInput::Number(0.0))).is_err());
    }
}
