//! JSON bodies of the submitting endpoints.
//!
//! Each body repeats the operation's parameters in readable form next to the nonce and
//! signature: amounts as decimal strings, addresses as lowercase hex. The node
//! re-encodes them to verify the signature, so the binary call data is never sent.

use alloy_primitives::Address;
use burnweb_chain_eip155::operations::{
    BurnToken, CreateStore, CreateToken, DeleteKeyValue, IssueToken, SetKeyValue, TransferToken,
};
use burnweb_types::{Amount, Nonce};
use serde::{Serialize, Serializer};

/// Serializes an address as lowercase `0x` hex.
pub(crate) fn lower_hex<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&alloy_primitives::hex::encode_prefixed(address))
}

/// `POST api/token/create`
#[derive(Debug, Clone, Serialize)]
pub struct CreateTokenRequest<'a> {
    #[serde(serialize_with = "lower_hex")]
    pub token_id: Address,
    pub name: &'a str,
    pub symbol: &'a str,
    pub decimals: u8,
    pub total_supply: Amount,
    #[serde(serialize_with = "lower_hex")]
    pub fee_token_id: Address,
    pub tx_fee: Amount,
    pub tx_fee_rate: Amount,
    pub icon: &'a str,
    pub mintable: bool,
    pub burnable: bool,
    pub nonce: Nonce,
    pub signature: String,
}

impl<'a> CreateTokenRequest<'a> {
    pub fn new(call: &'a CreateToken, nonce: Nonce, signature: String) -> Self {
        Self {
            token_id: call.token_id,
            name: &call.name,
            symbol: &call.symbol,
            decimals: call.decimals,
            total_supply: call.total_supply,
            fee_token_id: call.fee_token_id(),
            tx_fee: call.tx_fee,
            tx_fee_rate: call.tx_fee_rate,
            icon: &call.icon,
            mintable: call.mintable,
            burnable: call.burnable,
            nonce,
            signature,
        }
    }
}

/// `POST api/token/{id}/transfer` and `POST api/token/{id}/issue`
#[derive(Debug, Clone, Serialize)]
pub struct TransferRequest {
    #[serde(serialize_with = "lower_hex")]
    pub to: Address,
    pub value: Amount,
    pub nonce: Nonce,
    pub signature: String,
}

impl TransferRequest {
    pub fn transfer(call: &TransferToken, nonce: Nonce, signature: String) -> Self {
        Self {
            to: call.to,
            value: call.amount,
            nonce,
            signature,
        }
    }

    pub fn issue(call: &IssueToken, nonce: Nonce, signature: String) -> Self {
        Self {
            to: call.to,
            value: call.amount,
            nonce,
            signature,
        }
    }
}

/// `POST api/token/{id}/burn`
#[derive(Debug, Clone, Serialize)]
pub struct BurnRequest {
    pub value: Amount,
    pub nonce: Nonce,
    pub signature: String,
}

impl BurnRequest {
    pub fn new(call: &BurnToken, nonce: Nonce, signature: String) -> Self {
        Self {
            value: call.amount,
            nonce,
            signature,
        }
    }
}

/// `POST api/kvs/create`
#[derive(Debug, Clone, Serialize)]
pub struct CreateStoreRequest<'a> {
    #[serde(serialize_with = "lower_hex")]
    pub store_id: Address,
    pub name: &'a str,
    #[serde(serialize_with = "lower_hex")]
    pub fee_token_id: Address,
    pub tx_fee: Amount,
    pub nonce: Nonce,
    pub signature: String,
}

impl<'a> CreateStoreRequest<'a> {
    pub fn new(call: &'a CreateStore, nonce: Nonce, signature: String) -> Self {
        Self {
            store_id: call.store_id,
            name: &call.name,
            fee_token_id: call.fee_token_id(),
            tx_fee: call.tx_fee,
            nonce,
            signature,
        }
    }
}

/// `POST api/kvs/{id}/collections/{collection}`
#[derive(Debug, Clone, Serialize)]
pub struct SetKeyValueRequest<'a> {
    #[serde(serialize_with = "lower_hex")]
    pub store_id: Address,
    pub key: &'a str,
    pub value: &'a str,
    pub nonce: Nonce,
    pub signature: String,
}

impl<'a> SetKeyValueRequest<'a> {
    pub fn new(call: &'a SetKeyValue, nonce: Nonce, signature: String) -> Self {
        Self {
            store_id: call.store_id,
            key: &call.key,
            value: &call.value,
            nonce,
            signature,
        }
    }
}

/// `DELETE api/kvs/{id}/collections/{collection}`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteKeyValueRequest<'a> {
    #[serde(serialize_with = "lower_hex")]
    pub store_id: Address,
    pub key: &'a str,
    pub nonce: Nonce,
    pub signature: String,
}

impl<'a> DeleteKeyValueRequest<'a> {
    pub fn new(call: &'a DeleteKeyValue, nonce: Nonce, signature: String) -> Self {
        Self {
            store_id: call.store_id,
            key: &call.key,
            nonce,
            signature,
        }
    }
}
