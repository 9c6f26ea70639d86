use burnweb_types::AmountParseError;

use crate::abi::AbiError;
use crate::signer::SignerError;

/// Failure while turning caller input into a signed ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    #[error(transparent)]
    InvalidAmount(#[from] AmountParseError),
    #[error(transparent)]
    InvalidArgument(#[from] AbiError),
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("Signing failed: {0}")]
    SigningError(String),
}

impl From<SignerError> for CallError {
    fn from(error: SignerError) -> Self {
        match error {
            SignerError::InvalidPrivateKey(reason) => CallError::InvalidPrivateKey(reason),
            SignerError::Signing(reason) | SignerError::MalformedSignature(reason) => {
                CallError::SigningError(reason)
            }
        }
    }
}
