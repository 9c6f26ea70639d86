//! Contract-ABI argument encoding.
//!
//! The ledger dispatches on the same binary layout as Solidity contracts: a head of
//! 32-byte words, one per argument, followed by a tail that holds the payload of every
//! dynamically sized argument.
//!
//! - `uint256` and `bool` occupy one big-endian word.
//! - `address` occupies one word: 12 zero bytes followed by the 20 address bytes.
//! - `string` puts an offset word in the head. The offset counts bytes from the start
//!   of the argument block. The tail entry is a length word, the UTF-8 bytes, and zero
//!   padding up to the next word boundary.
//!
//! Only the subset of types used by the ledger's operations is supported.

use alloy_primitives::{Address, Bytes, Selector, U256};
use burnweb_types::Amount;
use std::fmt;

/// Width of one ABI slot.
pub const WORD: usize = 32;

const ADDRESS_LEN: usize = 20;

/// Argument types understood by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiType {
    String,
    Address,
    Uint256,
    Bool,
}

impl AbiType {
    /// Canonical type name as it appears in a function signature.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            AbiType::String => "string",
            AbiType::Address => "address",
            AbiType::Uint256 => "uint256",
            AbiType::Bool => "bool",
        }
    }

    /// Dynamic types are referenced from the head by offset.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, AbiType::String)
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// A single argument value.
///
/// Addresses are held as raw bytes so that malformed input is caught by the encoder
/// instead of by an earlier conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    String(String),
    Address(Bytes),
    Uint(Amount),
    Bool(bool),
}

impl AbiValue {
    fn kind(&self) -> &'static str {
        match self {
            AbiValue::String(_) => "string",
            AbiValue::Address(_) => "address",
            AbiValue::Uint(_) => "integer",
            AbiValue::Bool(_) => "bool",
        }
    }
}

impl From<&str> for AbiValue {
    fn from(value: &str) -> Self {
        AbiValue::String(value.to_string())
    }
}

impl From<String> for AbiValue {
    fn from(value: String) -> Self {
        AbiValue::String(value)
    }
}

impl From<Address> for AbiValue {
    fn from(value: Address) -> Self {
        AbiValue::Address(Bytes::copy_from_slice(value.as_slice()))
    }
}

impl From<Amount> for AbiValue {
    fn from(value: Amount) -> Self {
        AbiValue::Uint(value)
    }
}

impl From<u64> for AbiValue {
    fn from(value: u64) -> Self {
        AbiValue::Uint(Amount::from(value))
    }
}

impl From<bool> for AbiValue {
    fn from(value: bool) -> Self {
        AbiValue::Bool(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    #[error("Expected {expected} arguments, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },
    #[error("Invalid argument {index} for type {expected}: {reason}")]
    InvalidArgument {
        index: usize,
        expected: AbiType,
        reason: String,
    },
}

/// Encodes `values` against `types` into a head/tail argument block.
pub fn encode(types: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::ArgumentCount {
            expected: types.len(),
            actual: values.len(),
        });
    }
    let head_len = WORD * types.len();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for (index, (ty, value)) in types.iter().zip(values).enumerate() {
        if ty.is_dynamic() {
            let data = dynamic_bytes(index, ty, value)?;
            head.extend_from_slice(&usize_word(head_len + tail.len()));
            tail.extend_from_slice(&usize_word(data.len()));
            tail.extend_from_slice(data);
            tail.resize(tail.len() + padding(data.len()), 0);
        } else {
            head.extend_from_slice(&static_word(index, ty, value)?);
        }
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

/// Encodes a complete call payload: the 4-byte selector followed by the arguments.
pub fn encode_call(
    selector: Selector,
    types: &[AbiType],
    values: &[AbiValue],
) -> Result<Bytes, AbiError> {
    let arguments = encode(types, values)?;
    let mut calldata = Vec::with_capacity(selector.len() + arguments.len());
    calldata.extend_from_slice(selector.as_slice());
    calldata.extend_from_slice(&arguments);
    Ok(calldata.into())
}

fn static_word(index: usize, ty: &AbiType, value: &AbiValue) -> Result<[u8; WORD], AbiError> {
    match (ty, value) {
        (AbiType::Uint256, AbiValue::Uint(amount)) => Ok(amount.as_u256().to_be_bytes::<WORD>()),
        (AbiType::Uint256 | AbiType::Bool, AbiValue::Bool(flag)) => {
            Ok(usize_word(usize::from(*flag)))
        }
        (AbiType::Address, AbiValue::Address(bytes)) => {
            if bytes.len() != ADDRESS_LEN {
                return Err(AbiError::InvalidArgument {
                    index,
                    expected: *ty,
                    reason: format!("address must be 20 bytes, got {}", bytes.len()),
                });
            }
            let mut word = [0u8; WORD];
            word[WORD - ADDRESS_LEN..].copy_from_slice(bytes);
            Ok(word)
        }
        (ty, value) => Err(inadmissible(index, ty, value)),
    }
}

fn dynamic_bytes<'a>(
    index: usize,
    ty: &AbiType,
    value: &'a AbiValue,
) -> Result<&'a [u8], AbiError> {
    match (ty, value) {
        (AbiType::String, AbiValue::String(text)) => Ok(text.as_bytes()),
        (ty, value) => Err(inadmissible(index, ty, value)),
    }
}

fn inadmissible(index: usize, ty: &AbiType, value: &AbiValue) -> AbiError {
    AbiError::InvalidArgument {
        index,
        expected: *ty,
        reason: format!("{} value is not admissible", value.kind()),
    }
}

fn usize_word(value: usize) -> [u8; WORD] {
    U256::from(value).to_be_bytes::<WORD>()
}

fn padding(len: usize) -> usize {
    (WORD - len % WORD) % WORD
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex};
    use alloy_sol_types::{SolType, sol_data};

    type Mixed = (
        sol_data::String,
        sol_data::Uint<256>,
        sol_data::Address,
        sol_data::Bool,
        sol_data::String,
    );

    #[test]
    fn test_mixed_arguments_decode_with_standard_decoder() {
        let recipient = address!("0x1111111111111111111111111111111111111111");
        let types = [
            AbiType::String,
            AbiType::Uint256,
            AbiType::Address,
            AbiType::Bool,
            AbiType::String,
        ];
        let values = [
            AbiValue::from("Ünïcødé name"),
            AbiValue::Uint(Amount::MAX),
            AbiValue::from(recipient),
            AbiValue::from(true),
            AbiValue::from(""),
        ];
        let encoded = encode(&types, &values).unwrap();

        let (name, max, addr, flag, empty) = Mixed::abi_decode_params(&encoded).unwrap();
        assert_eq!(name, "Ünïcødé name");
        assert_eq!(max, U256::MAX);
        assert_eq!(addr, recipient);
        assert!(flag);
        assert_eq!(empty, "");

        let reference = Mixed::abi_encode_params(&(
            "Ünïcødé name".to_string(),
            U256::MAX,
            recipient,
            true,
            String::new(),
        ));
        assert_eq!(encoded, reference);
    }

    #[test]
    fn test_empty_string_layout() {
        let encoded = encode(&[AbiType::String], &[AbiValue::from("")]).unwrap();
        let mut expected = usize_word(0x20).to_vec();
        expected.extend_from_slice(&usize_word(0));
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_string_padding_and_offsets() {
        // 33 bytes spill into a second word; the next offset must account for it.
        let long = "a".repeat(33);
        let encoded = encode(
            &[AbiType::String, AbiType::String],
            &[AbiValue::from(long.as_str()), AbiValue::from("b")],
        )
        .unwrap();
        assert_eq!(encoded.len(), 2 * WORD + (WORD + 2 * WORD) + (WORD + WORD));
        assert_eq!(encoded[..WORD], usize_word(0x40));
        assert_eq!(encoded[WORD..2 * WORD], usize_word(0x40 + 3 * WORD));
        assert_eq!(encoded[2 * WORD..3 * WORD], usize_word(33));
        assert!(encoded[3 * WORD + 33..5 * WORD].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_multibyte_length_counts_bytes() {
        let encoded = encode(&[AbiType::String], &[AbiValue::from("€")]).unwrap();
        assert_eq!(encoded[WORD..2 * WORD], usize_word(3));
        assert_eq!(&encoded[2 * WORD..2 * WORD + 3], "€".as_bytes());
    }

    #[test]
    fn test_bool_as_uint256() {
        let encoded = encode(
            &[AbiType::Uint256, AbiType::Uint256],
            &[AbiValue::Bool(true), AbiValue::Bool(false)],
        )
        .unwrap();
        assert_eq!(encoded[..WORD], usize_word(1));
        assert_eq!(encoded[WORD..], usize_word(0));
    }

    #[test]
    fn test_address_right_aligned() {
        let encoded = encode(
            &[AbiType::Address],
            &[AbiValue::from(address!("0xffffffffffffffffffffffffffffffffffffffff"))],
        )
        .unwrap();
        assert!(encoded[..12].iter().all(|b| *b == 0));
        assert!(encoded[12..].iter().all(|b| *b == 0xff));
    }

    #[test]
    fn test_oversized_address_rejected() {
        let err = encode(
            &[AbiType::Uint256, AbiType::Address],
            &[AbiValue::from(1u64), AbiValue::Address(Bytes::from(vec![1u8; 21]))],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AbiError::InvalidArgument {
                index: 1,
                expected: AbiType::Address,
                ..
            }
        ));
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let err = encode(&[AbiType::Bool], &[AbiValue::from(1u64)]).unwrap_err();
        assert!(matches!(err, AbiError::InvalidArgument { index: 0, .. }));
        let err = encode(&[AbiType::String], &[AbiValue::from(true)]).unwrap_err();
        assert!(matches!(err, AbiError::InvalidArgument { index: 0, .. }));
    }

    #[test]
    fn test_only_strings_are_dynamic() {
        assert!(AbiType::String.is_dynamic());
        for ty in [AbiType::Address, AbiType::Uint256, AbiType::Bool] {
            assert!(!ty.is_dynamic());
        }
        // Dynamic slot after a static one points past the whole head.
        let encoded = encode(
            &[AbiType::Bool, AbiType::String, AbiType::Uint256],
            &[AbiValue::from(false), AbiValue::from("x"), AbiValue::from(7u64)],
        )
        .unwrap();
        assert_eq!(encoded[WORD..2 * WORD], usize_word(3 * WORD));
        let err = encode(
            &[AbiType::Uint256, AbiType::String],
            &[AbiValue::from(1u64), AbiValue::from(2u64)],
        )
        .unwrap_err();
        assert!(matches!(err, AbiError::InvalidArgument { index: 1, .. }));
    }

    #[test]
    fn test_argument_count_mismatch() {
        let err = encode(&[AbiType::Uint256, AbiType::Uint256], &[AbiValue::from(1u64)])
            .unwrap_err();
        assert_eq!(
            err,
            AbiError::ArgumentCount {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_encode_call_prefixes_selector() {
        let selector = Selector::new(hex!("42966c68"));
        let calldata = encode_call(selector, &[AbiType::Uint256], &[AbiValue::from(5u64)]).unwrap();
        assert_eq!(calldata.len(), 4 + WORD);
        assert_eq!(&calldata[..4], &hex!("42966c68"));
        assert_eq!(calldata[4..], usize_word(5));
    }
}
