//! Wall-clock transaction nonces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Per-transaction uniqueness value: milliseconds since the Unix epoch.
///
/// The ledger does not track account sequence numbers, so a fresh nonce is taken
/// from the wall clock for every transaction. Two transactions signed with the same
/// key inside the same millisecond get the same nonce; callers that submit in tight
/// loops must space their calls themselves.
///
/// Serializes as a bare JSON number, which is what request bodies carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nonce(u64);

impl Nonce {
    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Current wall-clock time in milliseconds. A clock set before 1970 yields zero.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();
        Self(millis)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Nonce {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
