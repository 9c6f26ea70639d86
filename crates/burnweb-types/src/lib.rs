#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for BurnWeb ledger clients.
//!
//! This crate provides the values shared by the transaction pipeline and the HTTP
//! client:
//! - [`amount::Amount`] - 256-bit unsigned amounts parsed from decimal or hex text
//! - [`nonce::Nonce`] - wall-clock transaction nonces
//! - [`chain::ChainParameters`] - network parameters used for replay protection

pub mod amount;
pub mod chain;
pub mod nonce;

pub use amount::{Amount, AmountParseError};
pub use chain::{ChainParameters, ChainParametersFormatError};
pub use nonce::Nonce;
