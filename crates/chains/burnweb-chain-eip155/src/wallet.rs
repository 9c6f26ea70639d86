//! Key and identifier generation.

use alloy_primitives::{Address, hex};
use alloy_signer_local::PrivateKeySigner;

use crate::signer::{SignerError, parse_private_key};

/// A key pair rendered for display and storage.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub address: Address,
    /// Lowercase `0x`-prefixed hex of the 32-byte secret.
    pub private_key: String,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl From<PrivateKeySigner> for Account {
    fn from(signer: PrivateKeySigner) -> Self {
        Self {
            address: signer.address(),
            private_key: hex::encode_prefixed(signer.to_bytes()),
        }
    }
}

/// Fresh account from the operating system's random source.
pub fn generate_account() -> Account {
    Account::from(PrivateKeySigner::random())
}

pub fn private_key_to_account(key: &str) -> Result<Account, SignerError> {
    parse_private_key(key).map(Account::from)
}

/// Identifier for a token or store that does not exist yet.
///
/// The address of a throwaway random key, so collisions are as unlikely as for
/// externally owned accounts.
pub fn generate_identifier() -> Address {
    PrivateKeySigner::random().address()
}
