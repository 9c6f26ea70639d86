use burnweb_chain_eip155::CallError;
use burnweb_chain_eip155::abi::AbiError;
use burnweb_chain_eip155::signer::SignerError;
use burnweb_types::AmountParseError;
use reqwest::StatusCode;

/// Errors returned by [`BurnWebClient`](crate::BurnWebClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Call(#[from] CallError),
    #[error("Chain parameters unavailable: {0}")]
    ChainParameterUnavailable(String),
    /// The node answered `500` with an error message.
    #[error("Server error: {message}")]
    ServerError { message: String },
    /// Any other non-success status, with the body as received.
    #[error("Request rejected with status {status}: {body}")]
    RemoteRejected { status: StatusCode, body: String },
    #[error("No private key configured for signing")]
    MissingPrivateKey,
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<SignerError> for ClientError {
    fn from(error: SignerError) -> Self {
        ClientError::Call(error.into())
    }
}

impl From<AbiError> for ClientError {
    fn from(error: AbiError) -> Self {
        ClientError::Call(error.into())
    }
}

impl From<AmountParseError> for ClientError {
    fn from(error: AmountParseError) -> Self {
        ClientError::Call(error.into())
    }
}

impl ClientError {
    /// True for failures raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::Call(_) | ClientError::MissingPrivateKey | ClientError::InvalidUrl(_)
        )
    }
}
