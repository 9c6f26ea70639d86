//! Command line and environment configuration.
//!
//! Every global flag can also be set through the environment, and `.env` in the
//! working directory is loaded before parsing.
//!
//! - `BURNWEB_URL`: node base URL (default `http://localhost:8080/`)
//! - `BURNWEB_PRIVATE_KEY`: hex private key used to sign submitted operations
//! - `RUST_LOG`: log filter (default `info`)

use alloy_primitives::Address;
use burnweb_reqwest::query::DATE_FORMAT;
use burnweb_types::Amount;
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};

pub const DEFAULT_URL: &str = "http://localhost:8080/";

#[derive(Debug, Parser)]
#[command(name = "burnweb", version, about = "Client for BurnWeb ledger nodes")]
pub struct Config {
    /// Base URL of the node
    #[arg(long, env = "BURNWEB_URL", default_value = DEFAULT_URL, global = true)]
    pub url: String,
    /// Private key for signing, 32 bytes in hex
    #[arg(long, env = "BURNWEB_PRIVATE_KEY", hide_env_values = true, global = true)]
    pub private_key: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Key management, no node required
    #[command(subcommand)]
    Account(AccountCommand),
    /// Current block height
    BlockNumber,
    /// Block by number or hash
    Block { id: String },
    /// Transaction by hash
    Transaction { hash: String },
    /// Token metadata
    Token { token_id: Address },
    /// Balance of an address, in the native asset unless `--token` is given
    Balance {
        address: Address,
        #[arg(long)]
        token: Option<Address>,
    },
    /// Token transaction history
    History {
        token_id: Address,
        #[arg(long)]
        from: Option<Address>,
        #[arg(long)]
        to: Option<Address>,
        /// UTC, `YYYY-MM-DD HH:MM:SS`
        #[arg(long, value_parser = parse_date)]
        start: Option<DateTime<Utc>>,
        /// UTC, `YYYY-MM-DD HH:MM:SS`
        #[arg(long, value_parser = parse_date)]
        end: Option<DateTime<Utc>>,
    },
    /// Create a token under a new id
    CreateToken {
        name: String,
        symbol: String,
        total_supply: Amount,
        #[arg(long, default_value_t = 18)]
        decimals: u8,
        /// Charge fees in the new token instead of the native asset
        #[arg(long)]
        self_funded_fees: bool,
        #[arg(long, default_value_t = Amount::ZERO)]
        tx_fee: Amount,
        #[arg(long, default_value_t = Amount::ZERO)]
        tx_fee_rate: Amount,
        #[arg(long, default_value = "")]
        icon: String,
        #[arg(long)]
        mintable: bool,
        #[arg(long)]
        burnable: bool,
    },
    /// Send tokens, or the native asset when `--token` is omitted
    Transfer {
        to: Address,
        amount: Amount,
        #[arg(long)]
        token: Option<Address>,
    },
    /// Mint tokens to an address
    Issue {
        token_id: Address,
        to: Address,
        amount: Amount,
    },
    /// Burn tokens held by the signer
    Burn { token_id: Address, amount: Amount },
    /// Create a key-value store under a new id
    CreateStore {
        name: String,
        /// Charge fees in the store id instead of the native asset
        #[arg(long)]
        self_funded_fees: bool,
        #[arg(long, default_value_t = Amount::ZERO)]
        tx_fee: Amount,
    },
    /// Write a value
    Set {
        store_id: Address,
        collection: String,
        key: String,
        value: String,
    },
    /// Read a value
    Get {
        store_id: Address,
        collection: String,
        key: String,
    },
    /// Delete a value
    Delete {
        store_id: Address,
        collection: String,
        key: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Generate a new random account
    New,
    /// Show the account of the configured private key
    Show,
}

fn parse_date(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, DATE_FORMAT).map(|naive| naive.and_utc())
}
