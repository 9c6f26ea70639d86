//! Typed call descriptors, one per [`Operation`].
//!
//! A descriptor owns the caller-supplied parameters of one ledger operation and knows
//! how to turn them into the operation's ABI argument list and transaction target.
//! The HTTP layer renders the same descriptor into the human-readable request body, so
//! the signed call data and the submitted parameters can not drift apart.
//!
//! Creating operations (`CreateToken`, `CreateStore`) carry an identifier generated
//! locally with [`generate_identifier`](crate::wallet::generate_identifier). It is both
//! the future on-ledger address of the entity and the `to` of the creating
//! transaction.

use alloy_primitives::Address;
use burnweb_types::Amount;

use crate::abi::AbiValue;
use crate::catalog::{FeePolicy, NATIVE_TOKEN, Operation};

/// A parameterised ledger operation that can be turned into a transaction.
pub trait LedgerCall {
    const OPERATION: Operation;

    /// Address the transaction is sent to.
    fn target(&self) -> Address;

    /// ABI arguments in catalog order.
    fn arguments(&self) -> Vec<AbiValue>;

    /// Recipient and value when the call is a plain native-asset transfer
    /// instead of a contract invocation.
    fn native_transfer(&self) -> Option<(Address, Amount)> {
        None
    }
}

/// Creates a new token whose address is `token_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateToken {
    pub token_id: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Amount,
    pub fee_policy: FeePolicy,
    pub tx_fee: Amount,
    pub tx_fee_rate: Amount,
    pub icon: String,
    pub mintable: bool,
    pub burnable: bool,
}

impl CreateToken {
    /// Token in which transaction fees are charged.
    pub fn fee_token_id(&self) -> Address {
        self.fee_policy.fee_token(self.token_id)
    }
}

impl LedgerCall for CreateToken {
    const OPERATION: Operation = Operation::CreateToken;

    fn target(&self) -> Address {
        self.token_id
    }

    fn arguments(&self) -> Vec<AbiValue> {
        vec![
            AbiValue::from(self.name.as_str()),
            AbiValue::from(self.symbol.as_str()),
            AbiValue::from(u64::from(self.decimals)),
            AbiValue::from(self.total_supply),
            AbiValue::from(self.fee_token_id()),
            AbiValue::from(self.tx_fee),
            AbiValue::from(self.tx_fee_rate),
            AbiValue::from(self.icon.as_str()),
            AbiValue::from(self.mintable),
            AbiValue::from(self.burnable),
        ]
    }
}

/// Moves `amount` of `token_id` to `to`.
///
/// When `token_id` is the native asset the transaction is a direct value transfer to
/// the recipient rather than a call into a token contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferToken {
    pub token_id: Address,
    pub to: Address,
    pub amount: Amount,
}

impl TransferToken {
    pub fn is_native(&self) -> bool {
        self.token_id == NATIVE_TOKEN
    }
}

impl LedgerCall for TransferToken {
    const OPERATION: Operation = Operation::TransferToken;

    fn target(&self) -> Address {
        if self.is_native() {
            self.to
        } else {
            self.token_id
        }
    }

    fn arguments(&self) -> Vec<AbiValue> {
        vec![AbiValue::from(self.to), AbiValue::from(self.amount)]
    }

    fn native_transfer(&self) -> Option<(Address, Amount)> {
        self.is_native().then_some((self.to, self.amount))
    }
}

/// Mints `amount` of a mintable token to `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueToken {
    pub token_id: Address,
    pub to: Address,
    pub amount: Amount,
}

impl LedgerCall for IssueToken {
    const OPERATION: Operation = Operation::IssueToken;

    fn target(&self) -> Address {
        self.token_id
    }

    fn arguments(&self) -> Vec<AbiValue> {
        vec![AbiValue::from(self.to), AbiValue::from(self.amount)]
    }
}

/// Burns `amount` of a burnable token from the signer's balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnToken {
    pub token_id: Address,
    pub amount: Amount,
}

impl LedgerCall for BurnToken {
    const OPERATION: Operation = Operation::BurnToken;

    fn target(&self) -> Address {
        self.token_id
    }

    fn arguments(&self) -> Vec<AbiValue> {
        vec![AbiValue::from(self.amount)]
    }
}

/// Creates a key-value store whose address is `store_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStore {
    pub store_id: Address,
    pub name: String,
    pub fee_policy: FeePolicy,
    pub tx_fee: Amount,
}

impl CreateStore {
    /// Store paying fees in the native asset with no per-transaction fee.
    pub fn new(store_id: Address, name: impl Into<String>) -> Self {
        Self {
            store_id,
            name: name.into(),
            fee_policy: FeePolicy::Native,
            tx_fee: Amount::ZERO,
        }
    }

    pub fn fee_token_id(&self) -> Address {
        self.fee_policy.fee_token(self.store_id)
    }
}

impl LedgerCall for CreateStore {
    const OPERATION: Operation = Operation::CreateStore;

    fn target(&self) -> Address {
        self.store_id
    }

    fn arguments(&self) -> Vec<AbiValue> {
        vec![
            AbiValue::from(self.name.as_str()),
            AbiValue::from(self.fee_token_id()),
            AbiValue::from(self.tx_fee),
        ]
    }
}

/// Writes `value` under `key` in a store collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetKeyValue {
    pub store_id: Address,
    pub collection: String,
    pub key: String,
    pub value: String,
}

impl LedgerCall for SetKeyValue {
    const OPERATION: Operation = Operation::SetKeyValue;

    fn target(&self) -> Address {
        self.store_id
    }

    fn arguments(&self) -> Vec<AbiValue> {
        vec![
            AbiValue::from(self.collection.as_str()),
            AbiValue::from(self.key.as_str()),
            AbiValue::from(self.value.as_str()),
        ]
    }
}

/// Removes `key` from a store collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteKeyValue {
    pub store_id: Address,
    pub collection: String,
    pub key: String,
}

impl LedgerCall for DeleteKeyValue {
    const OPERATION: Operation = Operation::DeleteKeyValue;

    fn target(&self) -> Address {
        self.store_id
    }

    fn arguments(&self) -> Vec<AbiValue> {
        vec![
            AbiValue::from(self.collection.as_str()),
            AbiValue::from(self.key.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{U256, address, hex};
    use alloy_sol_types::{SolCall, sol};

    sol! {
        function createToken(string name, string symbol, uint256 decimals, uint256 totalSupply, address feeToken, uint256 txFee, uint256 txFeeRate, string icon, uint256 mintable, uint256 burnable);
    }

    fn usdn(fee_policy: FeePolicy) -> CreateToken {
        CreateToken {
            token_id: address!("0x4444444444444444444444444444444444444444"),
            name: "Name".into(),
            symbol: "USDN".into(),
            decimals: 6,
            total_supply: Amount::parse("20000000000000000000000000").unwrap(),
            fee_policy,
            tx_fee: Amount::ZERO,
            tx_fee_rate: Amount::ZERO,
            icon: "icon".into(),
            mintable: true,
            burnable: false,
        }
    }

    #[test]
    fn test_create_token_call_data() {
        let call = usdn(FeePolicy::Native);
        let calldata = CreateToken::OPERATION.encode_call(&call.arguments()).unwrap();
        assert_eq!(&calldata[..4], &hex!("78e2fc09"));

        let decoded = createTokenCall::abi_decode(&calldata).unwrap();
        assert_eq!(decoded.name, "Name");
        assert_eq!(decoded.symbol, "USDN");
        assert_eq!(decoded.decimals, U256::from(6u64));
        assert_eq!(
            decoded.totalSupply.to_string(),
            "20000000000000000000000000"
        );
        assert_eq!(decoded.feeToken, NATIVE_TOKEN);
        assert_eq!(decoded.txFee, U256::ZERO);
        assert_eq!(decoded.txFeeRate, U256::ZERO);
        assert_eq!(decoded.icon, "icon");
        assert_eq!(decoded.mintable, U256::from(1u64));
        assert_eq!(decoded.burnable, U256::ZERO);
    }

    #[test]
    fn test_self_funded_token_pays_in_itself() {
        let call = usdn(FeePolicy::SelfFunded);
        assert_eq!(call.fee_token_id(), call.token_id);
        let calldata = CreateToken::OPERATION.encode_call(&call.arguments()).unwrap();
        let decoded = createTokenCall::abi_decode(&calldata).unwrap();
        assert_eq!(decoded.feeToken, call.token_id);
    }

    #[test]
    fn test_native_transfer_targets_recipient() {
        let to = address!("0x5555555555555555555555555555555555555555");
        let call = TransferToken {
            token_id: NATIVE_TOKEN,
            to,
            amount: Amount::from(1u64),
        };
        assert!(call.is_native());
        assert_eq!(call.target(), to);
        assert_eq!(call.native_transfer(), Some((to, Amount::from(1u64))));
    }

    #[test]
    fn test_token_transfer_targets_token() {
        let token_id = address!("0x6666666666666666666666666666666666666666");
        let call = TransferToken {
            token_id,
            to: address!("0x5555555555555555555555555555555555555555"),
            amount: Amount::from(1u64),
        };
        assert_eq!(call.target(), token_id);
        assert!(call.native_transfer().is_none());
    }

    #[test]
    fn test_create_store_defaults() {
        let store_id = address!("0x7777777777777777777777777777777777777777");
        let call = CreateStore::new(store_id, "settings");
        assert_eq!(call.fee_token_id(), NATIVE_TOKEN);
        assert_eq!(
            call.arguments(),
            vec![
                AbiValue::from("settings"),
                AbiValue::from(NATIVE_TOKEN),
                AbiValue::from(Amount::ZERO),
            ]
        );
    }
}
