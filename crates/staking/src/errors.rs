use thiserror::Error;

/// Errors returned by the reward engine.
///
/// Every variant is recoverable by the caller; nothing in this crate panics on
/// bad user input or a bad catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StakingError {
    #[error("invalid stake amount: {0}")]
    InvalidAmount(String),

    #[error("no staking tier selected")]
    NoTierSelected,

    #[error("minimum stake for {tier} tier is {minimum}")]
    BelowMinimum { tier: String, minimum: f64 },

    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: f64, available: f64 },

    #[error("staking tier not found: {0}")]
    TierNotFound(String),

    #[error("invalid tier catalog: {0}")]
    InvalidCatalog(String),
}

impl StakingError {
    /// Minimum stake carried by a [`StakingError::BelowMinimum`] error.
    pub fn minimum(&self) -> Option<f64> {
        match self {
            StakingError::BelowMinimum { minimum, .. } => Some(*minimum),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StakingError>;
