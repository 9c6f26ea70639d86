//! HTTP client for a BurnWeb node.
//!
//! Submitting operations are signed locally and posted together with their readable
//! parameters. Every submission needs the node's chain id, fetched once through a
//! [`ChainParameterResolver`] and then reused for the life of the client.
//!
//! # Endpoints
//!
//! | Method | Path | Client method |
//! |--------|------|---------------|
//! | `GET` | `api/blockchain` | [`BurnWebClient::chain_parameters`] |
//! | `GET` | `api/block_number` | [`BurnWebClient::block_number`] |
//! | `GET` | `api/blocks/{id}` | [`BurnWebClient::block`] |
//! | `GET` | `api/transactions/{hash}` | [`BurnWebClient::transaction`] |
//! | `GET` | `api/token/{id}` | [`BurnWebClient::token`] |
//! | `GET` | `api/token/{id}/balance/{address}` | [`BurnWebClient::balance_of`] |
//! | `GET` | `api/token/{id}/tx` | [`BurnWebClient::token_transactions`] |
//! | `POST` | `api/token/create` | [`BurnWebClient::create_token`] |
//! | `POST` | `api/token/{id}/transfer` | [`BurnWebClient::transfer_token`] |
//! | `POST` | `api/token/{id}/issue` | [`BurnWebClient::issue_token`] |
//! | `POST` | `api/token/{id}/burn` | [`BurnWebClient::burn_token`] |
//! | `POST` | `api/kvs/create` | [`BurnWebClient::create_store`] |
//! | `POST` | `api/kvs/{id}/collections/{collection}` | [`BurnWebClient::set_key_value`] |
//! | `DELETE` | `api/kvs/{id}/collections/{collection}` | [`BurnWebClient::delete_key_value`] |
//! | `GET` | `api/kvs/{id}/collections/{collection}/keys/{key}/value` | [`BurnWebClient::key_value`] |

use alloy_primitives::{Address, hex};
use async_trait::async_trait;
use burnweb_chain_eip155::operations::{
    BurnToken, CreateStore, CreateToken, DeleteKeyValue, IssueToken, LedgerCall, SetKeyValue,
    TransferToken,
};
use burnweb_chain_eip155::{FeePolicy, LedgerSigner, NATIVE_TOKEN, UnsignedTransaction};
use burnweb_chain_eip155::wallet::generate_identifier;
use burnweb_types::{Amount, ChainParameters, Nonce};
use reqwest::{RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
#[cfg(feature = "telemetry")]
use tracing::instrument;
use url::Url;

use crate::error::ClientError;
use crate::query::TokenTxFilter;
use crate::request::{
    BurnRequest, CreateStoreRequest, CreateTokenRequest, DeleteKeyValueRequest,
    SetKeyValueRequest, TransferRequest,
};
use crate::resolver::{ChainParameterResolver, ChainParameterSource};

/// Base URL plus HTTP connection pool.
#[derive(Debug, Clone)]
struct NodeEndpoint {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(serde::Deserialize)]
struct BlockchainInfo {
    chain_id: u64,
}

#[derive(serde::Deserialize)]
struct BlockNumberResponse {
    block_number: u64,
}

#[derive(serde::Deserialize)]
struct BalanceResponse {
    balance: Amount,
}

#[derive(serde::Deserialize)]
struct SubmitResponse {
    tx_hash: String,
}

#[derive(serde::Deserialize)]
struct KeyValueResponse {
    value: String,
}

impl NodeEndpoint {
    fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Appends percent-encoded `segments` to the base URL path.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let url = self.url(segments)?;
        self.send(self.http.get(url)).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(segments)?;
        self.send(self.http.post(url).json(body)).await
    }

    async fn delete<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(segments)?;
        self.send(self.http.delete(url).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(rejection(status, body));
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Maps a non-success response to an error, lifting the node's message out of a 500.
fn rejection(status: StatusCode, body: String) -> ClientError {
    if status != StatusCode::INTERNAL_SERVER_ERROR {
        return ClientError::RemoteRejected { status, body };
    }
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or(body);
    ClientError::ServerError { message }
}

#[async_trait]
impl ChainParameterSource for NodeEndpoint {
    async fn fetch_chain_parameters(&self) -> Result<ChainParameters, ClientError> {
        let info: BlockchainInfo = self.get(&["api", "blockchain"]).await?;
        Ok(ChainParameters::from_chain_id(info.chain_id))
    }
}

/// Result of [`BurnWebClient::create_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedToken {
    pub tx_hash: String,
    pub token_id: Address,
}

/// Result of [`BurnWebClient::create_store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedStore {
    pub tx_hash: String,
    pub store_id: Address,
}

/// Parameters of a token to be created. The token id is generated by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToken {
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

impl NewToken {
    /// Fixed-supply token with no fees and no icon.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        total_supply: Amount,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply,
            fee_policy: FeePolicy::Native,
            tx_fee: Amount::ZERO,
            tx_fee_rate: Amount::ZERO,
            icon: String::new(),
            mintable: false,
            burnable: false,
        }
    }

    fn into_call(self, token_id: Address) -> CreateToken {
        CreateToken {
            token_id,
            name: self.name,
            symbol: self.symbol,
            decimals: self.decimals,
            total_supply: self.total_supply,
            fee_policy: self.fee_policy,
            tx_fee: self.tx_fee,
            tx_fee_rate: self.tx_fee_rate,
            icon: self.icon,
            mintable: self.mintable,
            burnable: self.burnable,
        }
    }
}

/// Client bound to one node and, optionally, one signing key.
pub struct BurnWebClient {
    endpoint: NodeEndpoint,
    chain: ChainParameterResolver<NodeEndpoint>,
    signer: Option<LedgerSigner>,
}

impl BurnWebClient {
    /// Read-only client for the node at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        let endpoint = NodeEndpoint::new(reqwest::Client::new(), base_url);
        Ok(Self {
            chain: ChainParameterResolver::new(endpoint.clone()),
            endpoint,
            signer: None,
        })
    }

    /// Enables submitting operations. The key is validated immediately.
    pub fn with_private_key(mut self, private_key: &str) -> Result<Self, ClientError> {
        self.signer = Some(LedgerSigner::from_hex(private_key)?);
        Ok(self)
    }

    /// Replaces the underlying HTTP client, e.g. to set timeouts or proxies.
    pub fn with_http_client(self, http: reqwest::Client) -> Self {
        let endpoint = NodeEndpoint::new(http, self.endpoint.base_url);
        Self {
            chain: ChainParameterResolver::new(endpoint.clone()),
            endpoint,
            signer: self.signer,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.endpoint.base_url
    }

    /// Address of the configured signing key.
    pub fn address(&self) -> Option<Address> {
        self.signer.as_ref().map(LedgerSigner::address)
    }

    /// Chain parameters of the node, fetched on first use.
    pub async fn chain_parameters(&self) -> Result<ChainParameters, ClientError> {
        self.chain.resolve().await
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn block_number(&self) -> Result<u64, ClientError> {
        let response: BlockNumberResponse = self.endpoint.get(&["api", "block_number"]).await?;
        Ok(response.block_number)
    }

    /// Block by number or hash.
    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn block(&self, id: &str) -> Result<Value, ClientError> {
        self.endpoint.get(&["api", "blocks", id]).await
    }

    /// Native asset balance of `address`.
    pub async fn balance(&self, address: Address) -> Result<Amount, ClientError> {
        self.balance_of(NATIVE_TOKEN, address).await
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn balance_of(&self, token_id: Address, address: Address) -> Result<Amount, ClientError> {
        let token_id = hex::encode_prefixed(token_id);
        let address = hex::encode_prefixed(address);
        let response: BalanceResponse = self
            .endpoint
            .get(&["api", "token", &token_id, "balance", &address])
            .await?;
        Ok(response.balance)
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn transaction(&self, tx_hash: &str) -> Result<Value, ClientError> {
        self.endpoint.get(&["api", "transactions", tx_hash]).await
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn token(&self, token_id: Address) -> Result<Value, ClientError> {
        let token_id = hex::encode_prefixed(token_id);
        self.endpoint.get(&["api", "token", &token_id]).await
    }

    /// Transaction history of a token, narrowed by `filter`.
    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn token_transactions(
        &self,
        token_id: Address,
        filter: &TokenTxFilter,
    ) -> Result<Vec<Value>, ClientError> {
        let token_id = hex::encode_prefixed(token_id);
        let mut url = self.endpoint.url(&["api", "token", &token_id, "tx"])?;
        let pairs = filter.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        self.endpoint.send(self.endpoint.http.get(url)).await
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn key_value(
        &self,
        store_id: Address,
        collection: &str,
        key: &str,
    ) -> Result<String, ClientError> {
        let store_id = hex::encode_prefixed(store_id);
        let response: KeyValueResponse = self
            .endpoint
            .get(&["api", "kvs", &store_id, "collections", collection, "keys", key, "value"])
            .await?;
        Ok(response.value)
    }

    /// Creates a token under a freshly generated id.
    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn create_token(&self, token: NewToken) -> Result<CreatedToken, ClientError> {
        let call = token.into_call(generate_identifier());
        let (nonce, signature) = self.sign(&call).await?;
        let body = CreateTokenRequest::new(&call, nonce, signature);
        let response: SubmitResponse = self.endpoint.post(&["api", "token", "create"], &body).await?;
        Ok(CreatedToken {
            tx_hash: response.tx_hash,
            token_id: call.token_id,
        })
    }

    /// Sends `amount` of `token_id` to `to`. [`NATIVE_TOKEN`] moves the native asset.
    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn transfer_token(
        &self,
        token_id: Address,
        to: Address,
        amount: Amount,
    ) -> Result<String, ClientError> {
        let call = TransferToken {
            token_id,
            to,
            amount,
        };
        let (nonce, signature) = self.sign(&call).await?;
        let body = TransferRequest::transfer(&call, nonce, signature);
        let token_id = hex::encode_prefixed(token_id);
        self.submit(&["api", "token", &token_id, "transfer"], &body).await
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn issue_token(
        &self,
        token_id: Address,
        to: Address,
        amount: Amount,
    ) -> Result<String, ClientError> {
        let call = IssueToken {
            token_id,
            to,
            amount,
        };
        let (nonce, signature) = self.sign(&call).await?;
        let body = TransferRequest::issue(&call, nonce, signature);
        let token_id = hex::encode_prefixed(token_id);
        self.submit(&["api", "token", &token_id, "issue"], &body).await
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn burn_token(&self, token_id: Address, amount: Amount) -> Result<String, ClientError> {
        let call = BurnToken { token_id, amount };
        let (nonce, signature) = self.sign(&call).await?;
        let body = BurnRequest::new(&call, nonce, signature);
        let token_id = hex::encode_prefixed(token_id);
        self.submit(&["api", "token", &token_id, "burn"], &body).await
    }

    /// Creates a store that pays fees in the native asset with no per-transaction fee.
    pub async fn create_store(&self, name: &str) -> Result<CreatedStore, ClientError> {
        self.create_store_with_fee(name, FeePolicy::Native, Amount::ZERO)
            .await
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn create_store_with_fee(
        &self,
        name: &str,
        fee_policy: FeePolicy,
        tx_fee: Amount,
    ) -> Result<CreatedStore, ClientError> {
        let call = CreateStore {
            fee_policy,
            tx_fee,
            ..CreateStore::new(generate_identifier(), name)
        };
        let (nonce, signature) = self.sign(&call).await?;
        let body = CreateStoreRequest::new(&call, nonce, signature);
        let response: SubmitResponse = self.endpoint.post(&["api", "kvs", "create"], &body).await?;
        Ok(CreatedStore {
            tx_hash: response.tx_hash,
            store_id: call.store_id,
        })
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn set_key_value(
        &self,
        store_id: Address,
        collection: &str,
        key: &str,
        value: &str,
    ) -> Result<String, ClientError> {
        let call = SetKeyValue {
            store_id,
            collection: collection.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        };
        let (nonce, signature) = self.sign(&call).await?;
        let body = SetKeyValueRequest::new(&call, nonce, signature);
        let store_id = hex::encode_prefixed(store_id);
        self.submit(&["api", "kvs", &store_id, "collections", collection], &body)
            .await
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub async fn delete_key_value(
        &self,
        store_id: Address,
        collection: &str,
        key: &str,
    ) -> Result<String, ClientError> {
        let call = DeleteKeyValue {
            store_id,
            collection: collection.to_string(),
            key: key.to_string(),
        };
        let (nonce, signature) = self.sign(&call).await?;
        let body = DeleteKeyValueRequest::new(&call, nonce, signature);
        let store_id = hex::encode_prefixed(store_id);
        let response: SubmitResponse = self
            .endpoint
            .delete(&["api", "kvs", &store_id, "collections", collection], &body)
            .await?;
        Ok(response.tx_hash)
    }

    /// Encodes and signs `call`, returning the nonce and the serialized signature.
    ///
    /// Key and argument problems are reported before the node is contacted.
    async fn sign<C: LedgerCall>(&self, call: &C) -> Result<(Nonce, String), ClientError> {
        let signer = self.signer.as_ref().ok_or(ClientError::MissingPrivateKey)?;
        let nonce = Nonce::now();
        let tx = UnsignedTransaction::for_call(call, nonce)?;
        let params = self.chain.resolve().await?;
        let signature = signer.sign(&tx, &params)?;
        Ok((nonce, signature.to_hex()))
    }

    async fn submit<B: Serialize>(&self, segments: &[&str], body: &B) -> Result<String, ClientError> {
        let response: SubmitResponse = self.endpoint.post(segments, body).await?;
        Ok(response.tx_hash)
    }
}

impl fmt::Debug for BurnWebClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BurnWebClient")
            .field("base_url", &self.endpoint.base_url.as_str())
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}
