//! Chain identification types.
//!
//! - [`ChainParameters`] - network and chain ids bound into signatures

mod chain_params;

pub use chain_params::*;
