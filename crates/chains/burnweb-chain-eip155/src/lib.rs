#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Offline half of the BurnWeb client: everything between caller input and a signed
//! transaction.
//!
//! The pipeline for one operation is:
//! 1. a call descriptor from [`operations`] holds the typed parameters,
//! 2. [`catalog`] maps it to a selector and argument types,
//! 3. [`abi`] encodes the arguments into call data,
//! 4. [`transaction`] wraps the call data into a zero-gas EIP-155 legacy transaction,
//! 5. [`signer`] signs it and renders the signature in the ledger's hex format.
//!
//! Nothing here performs I/O. Chain parameters are supplied by the caller.

pub mod abi;
pub mod catalog;
pub mod error;
pub mod operations;
pub mod signer;
pub mod transaction;
pub mod wallet;

pub use catalog::{FeePolicy, NATIVE_TOKEN, Operation};
pub use error::CallError;
pub use operations::*;
pub use signer::{LedgerSigner, SignerError, TransactionSignature};
pub use transaction::UnsignedTransaction;
pub use wallet::{Account, generate_account, generate_identifier, private_key_to_account};
