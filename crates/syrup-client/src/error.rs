use chain_sol::SolError;
use thiserror::Error;

/// Failures of a single client invocation. None of them is retried.
#[derive(Debug, Error)]
pub enum SyrupError {
    #[error("missing or malformed address for `{role}`")]
    MissingRequiredAddress { role: &'static str },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("no bump seed yields an off-curve program address")]
    AddressDerivationExhausted,

    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("associated token account {address} does not exist")]
    AtaNotFound { address: String },

    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("transaction submission failed: {0}")]
    SubmissionFailure(String),

    #[error("keypair error: {0}")]
    Keypair(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Chain(SolError),
}

impl From<SolError> for SyrupError {
    fn from(e: SolError) -> Self {
        match e {
            SolError::AddressDerivationExhausted => SyrupError::AddressDerivationExhausted,
            SolError::InvalidSeed(msg) => SyrupError::InvalidSeed(msg),
            SolError::InvalidKeypair(msg) => SyrupError::Keypair(msg),
            other => SyrupError::Chain(other),
        }
    }
}
