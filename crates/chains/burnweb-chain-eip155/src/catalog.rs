//! Static table of ledger operations.
//!
//! Each operation is dispatched by a 4-byte selector, the first four bytes of the
//! Keccak-256 hash of its function signature, followed by ABI-encoded arguments of a
//! fixed type signature.
//!
//! | Operation | Selector | Function |
//! |-----------|----------|----------|
//! | [`Operation::CreateToken`] | `0x78e2fc09` | `createToken(string,string,uint256,uint256,address,uint256,uint256,string,uint256,uint256)` |
//! | [`Operation::TransferToken`] | `0xa9059cbb` | `transfer(address,uint256)` |
//! | [`Operation::IssueToken`] | `0x40c10f19` | `mint(address,uint256)` |
//! | [`Operation::BurnToken`] | `0x42966c68` | `burn(uint256)` |
//! | [`Operation::CreateStore`] | `0x06dc8de5` | `(string,address,uint256)` |
//! | [`Operation::SetKeyValue`] | `0xc6be612d` | `setKeyValue(string,string,string)` |
//! | [`Operation::DeleteKeyValue`] | `0x668f1f1b` | `deleteKeyValue(string,string)` |

use alloy_primitives::{Address, Bytes, Selector, hex};
use std::fmt;

use crate::abi::{self, AbiError, AbiType, AbiValue};

use crate::abi::AbiType::{Address as A, String as S, Uint256 as U};

/// Sentinel address standing for "no fee token", which is also the native asset's id.
pub const NATIVE_TOKEN: Address = Address::ZERO;

const CREATE_TOKEN_PARAMS: &[AbiType] = &[S, S, U, U, A, U, U, S, U, U];
const TRANSFER_PARAMS: &[AbiType] = &[A, U];
const BURN_PARAMS: &[AbiType] = &[U];
const CREATE_STORE_PARAMS: &[AbiType] = &[S, A, U];
const SET_KEY_VALUE_PARAMS: &[AbiType] = &[S, S, S];
const DELETE_KEY_VALUE_PARAMS: &[AbiType] = &[S, S];

/// A ledger operation that results in a signed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateToken,
    TransferToken,
    IssueToken,
    BurnToken,
    CreateStore,
    SetKeyValue,
    DeleteKeyValue,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::CreateToken,
        Operation::TransferToken,
        Operation::IssueToken,
        Operation::BurnToken,
        Operation::CreateStore,
        Operation::SetKeyValue,
        Operation::DeleteKeyValue,
    ];

    pub const fn selector(&self) -> Selector {
        let bytes = match self {
            Operation::CreateToken => hex!("78e2fc09"),
            Operation::TransferToken => hex!("a9059cbb"),
            Operation::IssueToken => hex!("40c10f19"),
            Operation::BurnToken => hex!("42966c68"),
            Operation::CreateStore => hex!("06dc8de5"),
            Operation::SetKeyValue => hex!("c6be612d"),
            Operation::DeleteKeyValue => hex!("668f1f1b"),
        };
        Selector::new(bytes)
    }

    pub const fn param_types(&self) -> &'static [AbiType] {
        match self {
            Operation::CreateToken => CREATE_TOKEN_PARAMS,
            Operation::TransferToken | Operation::IssueToken => TRANSFER_PARAMS,
            Operation::BurnToken => BURN_PARAMS,
            Operation::CreateStore => CREATE_STORE_PARAMS,
            Operation::SetKeyValue => SET_KEY_VALUE_PARAMS,
            Operation::DeleteKeyValue => DELETE_KEY_VALUE_PARAMS,
        }
    }

    /// Contract function name, when the ledger publishes one.
    ///
    /// The store-creation entry point is only known by its selector.
    pub const fn function_name(&self) -> Option<&'static str> {
        match self {
            Operation::CreateToken => Some("createToken"),
            Operation::TransferToken => Some("transfer"),
            Operation::IssueToken => Some("mint"),
            Operation::BurnToken => Some("burn"),
            Operation::CreateStore => None,
            Operation::SetKeyValue => Some("setKeyValue"),
            Operation::DeleteKeyValue => Some("deleteKeyValue"),
        }
    }

    /// Textual signature such as `transfer(address,uint256)`.
    pub fn function_signature(&self) -> Option<String> {
        let name = self.function_name()?;
        let params: Vec<&str> = self
            .param_types()
            .iter()
            .map(AbiType::canonical_name)
            .collect();
        Some(format!("{name}({})", params.join(",")))
    }

    /// Selector-prefixed call data for this operation.
    pub fn encode_call(&self, arguments: &[AbiValue]) -> Result<Bytes, AbiError> {
        abi::encode_call(self.selector(), self.param_types(), arguments)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CreateToken => "create_token",
            Operation::TransferToken => "transfer_token",
            Operation::IssueToken => "issue_token",
            Operation::BurnToken => "burn_token",
            Operation::CreateStore => "create_store",
            Operation::SetKeyValue => "set_key_value",
            Operation::DeleteKeyValue => "delete_key_value",
        };
        f.write_str(name)
    }
}

/// Who pays transaction fees for an entity created on the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FeePolicy {
    /// Fees are charged in the native asset.
    #[default]
    Native,
    /// Fees are charged in the entity's own token.
    SelfFunded,
}

impl FeePolicy {
    /// Fee token for an entity whose generated identifier is `own_id`.
    pub fn fee_token(&self, own_id: Address) -> Address {
        match self {
            FeePolicy::Native => NATIVE_TOKEN,
            FeePolicy::SelfFunded => own_id,
        }
    }
}

impl From<bool> for FeePolicy {
    fn from(self_funded: bool) -> Self {
        if self_funded {
            FeePolicy::SelfFunded
        } else {
            FeePolicy::Native
        }
    }
}
