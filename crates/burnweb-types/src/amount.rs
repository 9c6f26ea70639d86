//! Arbitrary-precision token amounts.
//!
//! Every numeric ledger argument (supplies, transfer values, fees) is an unsigned
//! 256-bit integer. JavaScript-era clients accepted numbers, strings or big integers
//! interchangeably and silently lost precision past 2^53; [`Amount`] has exactly one
//! fallible constructor from text so that cannot happen here.
//!
//! # Examples
//!
//! ```
//! use burnweb_types::amount::Amount;
//!
//! let supply = Amount::parse("20000000000000000000000000").unwrap();
//! assert_eq!(supply.to_decimal_string(), "20000000000000000000000000");
//!
//! let from_hex = Amount::parse("0xff").unwrap();
//! assert_eq!(from_hex, Amount::from(255u64));
//! assert_eq!(from_hex.to_padded_hex(4), "00ff");
//! ```

use alloy_primitives::U256;
use alloy_primitives::hex;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

/// A non-negative integer amount bounded by `2^256 - 1`.
///
/// # Serialization
///
/// Serializes to a decimal string: `"20000000000000000000000000"`. Deserializes from
/// a decimal or `0x`-prefixed hex string, or from a non-negative JSON integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(U256);

/// Error returned when text is not a valid [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid amount {input:?}: {reason}")]
pub struct AmountParseError {
    input: String,
    reason: &'static str,
}

impl AmountParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl Amount {
    pub const ZERO: Amount = Amount(U256::ZERO);
    pub const MAX: Amount = Amount(U256::MAX);

    /// Parses a decimal string or a `0x`-prefixed hexadecimal string.
    ///
    /// Whitespace, signs, separators and values above `2^256 - 1` are rejected.
    pub fn parse(text: &str) -> Result<Self, AmountParseError> {
        let (digits, radix) = match text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
        {
            Some(hex_digits) => (hex_digits, 16),
            None => (text, 10),
        };
        if digits.is_empty() {
            return Err(AmountParseError::new(text, "no digits"));
        }
        let well_formed = if radix == 16 {
            digits.bytes().all(|b| b.is_ascii_hexdigit())
        } else {
            digits.bytes().all(|b| b.is_ascii_digit())
        };
        if !well_formed {
            return Err(AmountParseError::new(text, "unexpected character"));
        }
        U256::from_str_radix(digits, radix)
            .map(Amount)
            .map_err(|_| AmountParseError::new(text, "exceeds 256 bits"))
    }

    /// Canonical base-10 rendering, without leading zeros.
    pub fn to_decimal_string(&self) -> String {
        self.0.to_string()
    }

    /// Lowercase hex without prefix, left-padded with zeros to at least `width` digits.
    ///
    /// Always at least one digit.
    pub fn to_padded_hex(&self, width: usize) -> String {
        let full = hex::encode(self.0.to_be_bytes::<32>());
        let minimal = match full.trim_start_matches('0') {
            "" => "0",
            digits => digits,
        };
        format!("{minimal:0>width$}")
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Amount(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(U256::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Amount(U256::from(value))
    }
}

impl From<Amount> for U256 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AmountVisitor;

        impl de::Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer or a decimal/hex string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                Amount::parse(v).map_err(de::Error::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                Ok(Amount::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                u64::try_from(v)
                    .map(Amount::from)
                    .map_err(|_| de::Error::custom("amount must not be negative"))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}
