//! VVT Staking — tier catalog & reward projection
//!
//! Pure, synchronous reward engine for the VVT staking dashboard:
//! - Tier catalog loading and validation from static configuration
//! - Stake validation (amount parsing, tier minimum, optional balance)
//! - Simple, non-compounding daily/monthly/yearly reward projection
//! - Informational withdrawal fee and multiplier helpers
//!
//! The engine holds no state between calls. Wallet I/O and transaction
//! submission live in `vvt-wallet`.

pub mod amount;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod projection;
pub mod types;
pub mod validation;

pub use amount::*;
pub use catalog::*;
pub use config::{load_catalog_file, ConfigError, StakingConfig};
pub use errors::*;
pub use projection::*;
pub use types::*;
pub use validation::*;

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
