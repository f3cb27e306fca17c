//! VVT Wallet Integration
//!
//! Narrow interfaces to the wallet provider and staking contract, plus the
//! dashboard session state and stake flow built on top of `vvt-staking`.

pub mod connector;
pub mod errors;
pub mod flow;
pub mod mock;
pub mod session;
pub mod types;
pub mod units;

pub use connector::*;
pub use errors::*;
pub use flow::StakeFlow;
pub use session::DashboardSession;
pub use types::*;
pub use units::*;
