use thiserror::Error;
use vvt_staking::StakingError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("Wallet provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Wallet connection rejected: {0}")]
    ConnectionRejected(String),

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Wrong network: expected chain {expected}, connected to chain {actual}")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error("Staking contract not deployed for token {contract}")]
    ContractNotDeployed { contract: String },

    #[error("Invalid token amount: {0}")]
    InvalidUnits(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error(transparent)]
    Staking(#[from] StakingError),
}

pub type Result<T> = std::result::Result<T, WalletError>;
