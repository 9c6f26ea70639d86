//! Unsigned transaction assembly.
//!
//! Every ledger operation becomes an EIP-155 legacy transaction with zero gas price
//! and zero gas limit: fees are accounted in application-level fee tokens, not gas.
//! The chain parameters are only bound in at hashing time, so one
//! [`UnsignedTransaction`] can be built before the chain has been queried.

use alloy_consensus::{SignableTransaction, TxLegacy};
use alloy_primitives::{Address, B256, Bytes, TxKind};
use burnweb_types::{Amount, ChainParameters, Nonce};

use crate::abi::AbiError;
use crate::operations::LedgerCall;

/// Transaction fields before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub nonce: Nonce,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: Address,
    pub value: Amount,
    pub data: Bytes,
}

impl UnsignedTransaction {
    /// Contract invocation carrying `data` and no value.
    pub fn contract_call(to: Address, data: Bytes, nonce: Nonce) -> Self {
        Self {
            nonce,
            gas_price: 0,
            gas_limit: 0,
            to,
            value: Amount::ZERO,
            data,
        }
    }

    /// Plain transfer of the native asset with empty call data.
    pub fn value_transfer(to: Address, value: Amount, nonce: Nonce) -> Self {
        Self {
            nonce,
            gas_price: 0,
            gas_limit: 0,
            to,
            value,
            data: Bytes::new(),
        }
    }

    /// Builds the transaction for a ledger call.
    ///
    /// Native-asset transfers become value transfers to the recipient; every other
    /// call is ABI-encoded against its catalog entry and sent to the call's target.
    pub fn for_call<C: LedgerCall>(call: &C, nonce: Nonce) -> Result<Self, AbiError> {
        if let Some((to, value)) = call.native_transfer() {
            return Ok(Self::value_transfer(to, value, nonce));
        }
        let data = C::OPERATION.encode_call(&call.arguments())?;
        Ok(Self::contract_call(call.target(), data, nonce))
    }

    /// EIP-155 legacy transaction bound to `params`.
    pub fn to_legacy(&self, params: &ChainParameters) -> TxLegacy {
        TxLegacy {
            chain_id: Some(params.chain_id),
            nonce: self.nonce.as_u64(),
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: TxKind::Call(self.to),
            value: self.value.as_u256(),
            input: self.data.clone(),
        }
    }

    /// Keccak-256 of the RLP list `[nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0]`.
    pub fn signing_hash(&self, params: &ChainParameters) -> B256 {
        self.to_legacy(params).signature_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NATIVE_TOKEN;
    use crate::operations::{BurnToken, TransferToken};
    use alloy_primitives::{U256, address, hex, keccak256};

    #[test]
    fn test_native_transfer_has_no_data() {
        let to = address!("0x8888888888888888888888888888888888888888");
        let call = TransferToken {
            token_id: NATIVE_TOKEN,
            to,
            amount: Amount::parse("1").unwrap(),
        };
        let tx = UnsignedTransaction::for_call(&call, Nonce::new(1)).unwrap();
        assert!(tx.data.is_empty());
        assert_eq!(tx.value, Amount::parse("1").unwrap());
        assert_eq!(tx.to, to);
        assert_eq!(tx.gas_price, 0);
        assert_eq!(tx.gas_limit, 0);
    }

    #[test]
    fn test_token_transfer_is_contract_call() {
        let token_id = address!("0x9999999999999999999999999999999999999999");
        let call = TransferToken {
            token_id,
            to: address!("0x8888888888888888888888888888888888888888"),
            amount: Amount::from(7u64),
        };
        let tx = UnsignedTransaction::for_call(&call, Nonce::new(1)).unwrap();
        assert_eq!(tx.to, token_id);
        assert_eq!(tx.value, Amount::ZERO);
        assert_eq!(&tx.data[..4], &hex!("a9059cbb"));
        assert_eq!(tx.data.len(), 4 + 64);
    }

    #[test]
    fn test_legacy_fields() {
        let call = BurnToken {
            token_id: address!("0x9999999999999999999999999999999999999999"),
            amount: Amount::from(3u64),
        };
        let tx = UnsignedTransaction::for_call(&call, Nonce::new(1_571_000_000_000)).unwrap();
        let legacy = tx.to_legacy(&ChainParameters::from_chain_id(1337));
        assert_eq!(legacy.chain_id, Some(1337));
        assert_eq!(legacy.nonce, 1_571_000_000_000);
        assert_eq!(legacy.gas_price, 0);
        assert_eq!(legacy.gas_limit, 0);
        assert_eq!(legacy.to, TxKind::Call(call.token_id));
        assert_eq!(legacy.value, U256::ZERO);
        assert_eq!(legacy.input, tx.data);
    }

    #[test]
    fn test_signing_hash_is_chain_bound() {
        let tx = UnsignedTransaction::value_transfer(
            address!("0x8888888888888888888888888888888888888888"),
            Amount::from(1u64),
            Nonce::new(9),
        );
        let a = tx.signing_hash(&ChainParameters::from_chain_id(1));
        let b = tx.signing_hash(&ChainParameters::from_chain_id(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_signing_hash_matches_eip155_rlp() {
        // nonce=9, gasPrice=0, gasLimit=0, to, value=1, data=empty, chainId=1, 0, 0
        let to = address!("0x8888888888888888888888888888888888888888");
        let tx = UnsignedTransaction::value_transfer(to, Amount::from(1u64), Nonce::new(9));
        let mut rlp = vec![0xdd, 0x09, 0x80, 0x80, 0x94];
        rlp.extend_from_slice(to.as_slice());
        rlp.extend_from_slice(&[0x01, 0x80, 0x01, 0x80, 0x80]);
        assert_eq!(
            tx.signing_hash(&ChainParameters::from_chain_id(1)),
            keccak256(&rlp)
        );
    }
}
