//! Network-identifying parameters mixed into every transaction signature.
//!
//! A BurnWeb ledger advertises one numeric `chain_id` at `GET /api/blockchain`. It is
//! used both as the network id and as the EIP-155 chain id, so a transaction signed
//! for one ledger can not be replayed on another.
//!
//! # Examples
//!
//! ```
//! use burnweb_types::chain::ChainParameters;
//!
//! let params = ChainParameters::from_chain_id(1337);
//! assert_eq!(params.to_string(), "1337:1337");
//!
//! let parsed: ChainParameters = "1:3".parse().unwrap();
//! assert_eq!(parsed.network_id, 1);
//! assert_eq!(parsed.chain_id, 3);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

/// Chain parameters used for replay-protected signing.
///
/// # Serialization
///
/// Serializes to/from a colon-separated string: `"1337:1337"`
/// (`network_id:chain_id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainParameters {
    /// The peer-to-peer network id.
    pub network_id: u64,
    /// The EIP-155 chain id bound into signatures.
    pub chain_id: u64,
}

impl ChainParameters {
    pub fn new(network_id: u64, chain_id: u64) -> Self {
        Self {
            network_id,
            chain_id,
        }
    }

    /// Parameters for a ledger that reports a single id for both roles.
    pub fn from_chain_id(chain_id: u64) -> Self {
        Self::new(chain_id, chain_id)
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn network_id(&self) -> u64 {
        self.network_id
    }
}

impl fmt::Display for ChainParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.network_id, self.chain_id)
    }
}

/// Error returned when parsing an invalid chain parameters string.
///
/// A valid string is `network_id:chain_id`, both unsigned 64-bit decimals.
#[derive(Debug, thiserror::Error)]
#[error("Invalid chain parameters format {0}")]
pub struct ChainParametersFormatError(String);

impl FromStr for ChainParameters {
    type Err = ChainParametersFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (network_id, chain_id) = s
            .split_once(':')
            .ok_or_else(|| ChainParametersFormatError(s.into()))?;
        let network_id = network_id
            .parse()
            .map_err(|_| ChainParametersFormatError(s.into()))?;
        let chain_id = chain_id
            .parse()
            .map_err(|_| ChainParametersFormatError(s.into()))?;
        Ok(ChainParameters::new(network_id, chain_id))
    }
}

impl Serialize for ChainParameters {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ChainParameters {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ChainParameters::from_str(&s).map_err(de::Error::custom)
    }
}
