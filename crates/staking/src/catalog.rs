//! Staking tier catalog
//!
//! A catalog is loaded once from configuration and never mutated afterwards.
//! Insertion order is preserved; it is the default display order.

use crate::errors::{Result, StakingError};
use crate::types::{StakingTier, TierId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// Tier entry as written in configuration, before validation.
///
/// `lock_period_days` is signed so that a negative value can be reported as a
/// catalog error instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSpec {
    pub id: TierId,
    pub name: String,
    pub apy_percent: f64,
    pub min_amount: f64,
    #[serde(default)]
    pub lock_period_days: i64,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    #[serde(default)]
    pub withdrawal_fee_percent: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub benefits: Vec<String>,
}

fn default_multiplier() -> f64 {
    1.0
}

/// Static configuration describing a tier catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSource {
    #[serde(default)]
    pub tiers: Vec<TierSpec>,
}

impl CatalogSource {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| StakingError::InvalidCatalog(format!("failed to parse TOML catalog: {e}")))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| StakingError::InvalidCatalog(format!("failed to parse JSON catalog: {e}")))
    }
}

/// Non-fatal catalog issue. A catalog with warnings is still usable.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogWarning {
    /// `min_amount` decreases from one tier to the next
    UnsortedMinimum { previous: TierId, next: TierId },
    /// APY decreases while the minimum stake rises
    NonMonotonicApy { previous: TierId, next: TierId },
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogWarning::UnsortedMinimum { previous, next } => write!(
                f,
                "tier '{next}' has a lower minimum than preceding tier '{previous}'"
            ),
            CatalogWarning::NonMonotonicApy { previous, next } => write!(
                f,
                "tier '{next}' pays a lower APY than lower-minimum tier '{previous}'"
            ),
        }
    }
}

/// Ordered, validated set of staking tiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    tiers: Vec<StakingTier>,
}

impl Catalog {
    pub fn tiers(&self) -> &[StakingTier] {
        &self.tiers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StakingTier> {
        self.tiers.iter()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Look up a tier by id.
    pub fn select(&self, tier_id: &str) -> Result<&StakingTier> {
        select_tier(&self.tiers, tier_id)
    }

    pub fn warnings(&self) -> Vec<CatalogWarning> {
        check_monotonic(&self.tiers)
    }

    /// Tiers whose minimum is met by `amount`, in catalog order.
    pub fn eligible_tiers(&self, amount: f64) -> Vec<&StakingTier> {
        eligible_tiers(&self.tiers, amount)
    }

    /// Highest-APY tier the amount qualifies for.
    pub fn best_tier_for(&self, amount: f64) -> Option<&StakingTier> {
        best_tier_for(&self.tiers, amount)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a StakingTier;
    type IntoIter = std::slice::Iter<'a, StakingTier>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiers.iter()
    }
}

/// Validate a catalog source and build the ordered tier list.
///
/// Fails on negative APY, minimum, lock period or withdrawal fee, on a
/// non-positive or non-finite multiplier, and on duplicate ids. Ordering
/// problems are logged as warnings and do not fail the load.
pub fn load_catalog(source: CatalogSource) -> Result<Catalog> {
    let mut seen: HashSet<TierId> = HashSet::with_capacity(source.tiers.len());
    let mut tiers = Vec::with_capacity(source.tiers.len());

    for spec in source.tiers {
        if !seen.insert(spec.id.clone()) {
            return Err(StakingError::InvalidCatalog(format!(
                "duplicate tier id '{}'",
                spec.id
            )));
        }
        tiers.push(validate_spec(spec)?);
    }

    let catalog = Catalog { tiers };
    for warning in catalog.warnings() {
        warn!(target: "staking", "catalog configuration warning: {}", warning);
    }
    debug!(target: "staking", "loaded catalog with {} tiers", catalog.len());

    Ok(catalog)
}

fn validate_spec(spec: TierSpec) -> Result<StakingTier> {
    let invalid = |reason: &str| -> Result<StakingTier> {
        Err(StakingError::InvalidCatalog(format!(
            "tier '{}': {reason}",
            spec.id
        )))
    };

    if spec.id.trim().is_empty() {
        return Err(StakingError::InvalidCatalog("tier id must not be empty".into()));
    }
    if !(spec.apy_percent.is_finite() && spec.apy_percent >= 0.0) {
        return invalid("apy_percent must be a non-negative number");
    }
    if !(spec.min_amount.is_finite() && spec.min_amount >= 0.0) {
        return invalid("min_amount must be a non-negative number");
    }
    if spec.lock_period_days < 0 {
        return invalid("lock_period_days must not be negative");
    }
    let Ok(lock_period_days) = u32::try_from(spec.lock_period_days) else {
        return invalid("lock_period_days is out of range");
    };
    if !(spec.multiplier.is_finite() && spec.multiplier > 0.0) {
        return invalid("multiplier must be positive");
    }
    if !(spec.withdrawal_fee_percent.is_finite() && spec.withdrawal_fee_percent >= 0.0) {
        return invalid("withdrawal_fee_percent must be a non-negative number");
    }

    Ok(StakingTier {
        id: spec.id,
        name: spec.name,
        apy_percent: spec.apy_percent,
        min_amount: spec.min_amount,
        lock_period_days,
        multiplier: spec.multiplier,
        withdrawal_fee_percent: spec.withdrawal_fee_percent,
        description: spec.description,
        benefits: spec.benefits,
    })
}

/// Find the tier whose id equals `tier_id`.
pub fn select_tier<'a>(tiers: &'a [StakingTier], tier_id: &str) -> Result<&'a StakingTier> {
    tiers
        .iter()
        .find(|tier| tier.id == tier_id)
        .ok_or_else(|| StakingError::TierNotFound(tier_id.to_string()))
}

/// Report ordering problems in a tier list.
pub fn check_monotonic(tiers: &[StakingTier]) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();
    for pair in tiers.windows(2) {
        let (previous, next) = (&pair[0], &pair[1]);
        if next.min_amount < previous.min_amount {
            warnings.push(CatalogWarning::UnsortedMinimum {
                previous: previous.id.clone(),
                next: next.id.clone(),
            });
        } else if next.min_amount > previous.min_amount && next.apy_percent < previous.apy_percent
        {
            warnings.push(CatalogWarning::NonMonotonicApy {
                previous: previous.id.clone(),
                next: next.id.clone(),
            });
        }
    }
    warnings
}

pub fn eligible_tiers(tiers: &[StakingTier], amount: f64) -> Vec<&StakingTier> {
    if !amount.is_finite() {
        return Vec::new();
    }
    tiers.iter().filter(|tier| tier.accepts(amount)).collect()
}

/// Highest APY among eligible tiers; the earliest tier wins a tie.
pub fn best_tier_for(tiers: &[StakingTier], amount: f64) -> Option<&StakingTier> {
    let mut best: Option<&StakingTier> = None;
    for tier in eligible_tiers(tiers, amount) {
        match best {
            Some(current) if current.apy_percent >= tier.apy_percent => {}
            _ => best = Some(tier),
        }
    }
    best
}

/// The built-in five-tier catalog.
pub fn reference_catalog() -> Catalog {
    let tiers = reference_tier_specs()
        .into_iter()
        .filter_map(|spec| validate_spec(spec).ok())
        .collect();
    Catalog { tiers }
}

/// The built-in tiers as a configuration source.
pub fn reference_source() -> CatalogSource {
    CatalogSource {
        tiers: reference_tier_specs(),
    }
}

fn reference_tier_specs() -> Vec<TierSpec> {
    #[allow(clippy::too_many_arguments)]
    fn spec(
        id: &str,
        name: &str,
        apy_percent: f64,
        min_amount: f64,
        lock_period_days: i64,
        multiplier: f64,
        withdrawal_fee_percent: f64,
        description: &str,
        benefits: &[&str],
    ) -> TierSpec {
        TierSpec {
            id: id.to_string(),
            name: name.to_string(),
            apy_percent,
            min_amount,
            lock_period_days,
            multiplier,
            withdrawal_fee_percent,
            description: description.to_string(),
            benefits: benefits.iter().map(|b| b.to_string()).collect(),
        }
    }

    vec![
        spec(
            "flexible",
            "Flexible",
            8.5,
            100.0,
            0,
            1.0,
            2.0,
            "No lock period, withdraw anytime",
            &["Basic staking rewards", "Reduced withdrawal fees", "Instant liquidity"],
        ),
        spec(
            "short",
            "Short Term",
            10.0,
            500.0,
            30,
            1.1,
            1.5,
            "30-day commitment for higher rewards",
            &["10% APY", "1.1x reward multiplier", "Lower fees", "Priority support"],
        ),
        spec(
            "medium",
            "Medium Term",
            12.5,
            1000.0,
            90,
            1.25,
            1.0,
            "90-day commitment with premium benefits",
            &["12.5% APY", "1.25x multiplier", "Priority support", "Early feature access"],
        ),
        spec(
            "long",
            "Long Term",
            15.0,
            2500.0,
            180,
            1.5,
            0.5,
            "180-day commitment for serious stakers",
            &["15% APY", "1.5x multiplier", "Premium features", "Governance voting"],
        ),
        spec(
            "diamond",
            "Diamond Hands",
            18.0,
            5000.0,
            365,
            2.0,
            0.0,
            "1-year commitment for maximum rewards",
            &["18% APY", "2x multiplier", "Zero fees", "Governance rights", "Exclusive perks"],
        ),
    ]
}
