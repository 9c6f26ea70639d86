#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `reqwest` client for BurnWeb ledger nodes.
//!
//! [`BurnWebClient`] signs ledger operations locally with
//! [`burnweb_chain_eip155`] and submits them over HTTP, and wraps the node's
//! read-only query endpoints.
//!
//! ```no_run
//! use burnweb_reqwest::{BurnWebClient, NewToken};
//! use burnweb_types::Amount;
//!
//! # async fn run() -> Result<(), burnweb_reqwest::ClientError> {
//! let client = BurnWebClient::new("http://localhost:8080/")?
//!     .with_private_key("0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80")?;
//! let supply = Amount::parse("20000000000000000000000000")?;
//! let created = client.create_token(NewToken::new("Name", "USDN", 6, supply)).await?;
//! println!("{} created in {}", created.token_id, created.tx_hash);
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `telemetry`: `tracing` spans around every network call.

pub mod client;
pub mod error;
pub mod query;
pub mod request;
pub mod resolver;

pub use client::{BurnWebClient, CreatedStore, CreatedToken, NewToken};
pub use error::ClientError;
pub use query::TokenTxFilter;
pub use resolver::{ChainParameterResolver, ChainParameterSource};
