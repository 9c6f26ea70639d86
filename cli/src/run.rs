//! `burnweb` command execution.
//!
//! Results are printed to stdout as JSON, logs go to stderr.

use alloy_primitives::hex;
use burnweb_chain_eip155::wallet::{Account, generate_account, private_key_to_account};
use burnweb_chain_eip155::{FeePolicy, NATIVE_TOKEN};
use burnweb_reqwest::{BurnWebClient, NewToken, TokenTxFilter};
use clap::Parser;
use dotenvy::dotenv;
use serde_json::{Value, json};
use std::io;
use tracing_subscriber::EnvFilter;

use crate::config::{AccountCommand, Command, Config};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn account_json(account: &Account) -> Value {
    json!({
        "address": hex::encode_prefixed(account.address),
        "private_key": account.private_key,
    })
}

fn tx_json(tx_hash: String) -> Value {
    json!({ "tx_hash": tx_hash })
}

/// Loads `.env`, parses arguments and runs one command.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env variables
    dotenv().ok();
    init_tracing();

    let config = Config::parse();
    let output = match config.command {
        Command::Account(AccountCommand::New) => account_json(&generate_account()),
        Command::Account(AccountCommand::Show) => {
            let key = config
                .private_key
                .as_deref()
                .ok_or("no private key configured, set --private-key or BURNWEB_PRIVATE_KEY")?;
            account_json(&private_key_to_account(key)?)
        }
        command => {
            let mut client = BurnWebClient::new(&config.url)?;
            if let Some(key) = config.private_key.as_deref() {
                client = client.with_private_key(key)?;
            }
            tracing::debug!(url = %client.base_url(), signer = ?client.address(), "Client ready");
            execute(&client, command).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn execute(
    client: &BurnWebClient,
    command: Command,
) -> Result<Value, Box<dyn std::error::Error>> {
    let output = match command {
        Command::Account(_) => return Err("account commands run without a node".into()),
        Command::BlockNumber => json!({ "block_number": client.block_number().await? }),
        Command::Block { id } => client.block(&id).await?,
        Command::Transaction { hash } => client.transaction(&hash).await?,
        Command::Token { token_id } => client.token(token_id).await?,
        Command::Balance { address, token } => {
            let balance = client
                .balance_of(token.unwrap_or(NATIVE_TOKEN), address)
                .await?;
            json!({ "balance": balance })
        }
        Command::History {
            token_id,
            from,
            to,
            start,
            end,
        } => {
            let filter = TokenTxFilter {
                from,
                to,
                start,
                end,
            };
            Value::Array(client.token_transactions(token_id, &filter).await?)
        }
        Command::CreateToken {
            name,
            symbol,
            total_supply,
            decimals,
            self_funded_fees,
            tx_fee,
            tx_fee_rate,
            icon,
            mintable,
            burnable,
        } => {
            let token = NewToken {
                fee_policy: FeePolicy::from(self_funded_fees),
                tx_fee,
                tx_fee_rate,
                icon,
                mintable,
                burnable,
                ..NewToken::new(name, symbol, decimals, total_supply)
            };
            let created = client.create_token(token).await?;
            tracing::info!(token_id = %created.token_id, "Token submitted");
            json!({
                "tx_hash": created.tx_hash,
                "token_id": hex::encode_prefixed(created.token_id),
            })
        }
        Command::Transfer { to, amount, token } => tx_json(
            client
                .transfer_token(token.unwrap_or(NATIVE_TOKEN), to, amount)
                .await?,
        ),
        Command::Issue {
            token_id,
            to,
            amount,
        } => tx_json(client.issue_token(token_id, to, amount).await?),
        Command::Burn { token_id, amount } => tx_json(client.burn_token(token_id, amount).await?),
        Command::CreateStore {
            name,
            self_funded_fees,
            tx_fee,
        } => {
            let created = client
                .create_store_with_fee(&name, FeePolicy::from(self_funded_fees), tx_fee)
                .await?;
            tracing::info!(store_id = %created.store_id, "Store submitted");
            json!({
                "tx_hash": created.tx_hash,
                "store_id": hex::encode_prefixed(created.store_id),
            })
        }
        Command::Set {
            store_id,
            collection,
            key,
            value,
        } => tx_json(
            client
                .set_key_value(store_id, &collection, &key, &value)
                .await?,
        ),
        Command::Get {
            store_id,
            collection,
            key,
        } => json!({ "value": client.key_value(store_id, &collection, &key).await? }),
        Command::Delete {
            store_id,
            collection,
            key,
        } => tx_json(client.delete_key_value(store_id, &collection, &key).await?),
    };
    Ok(output)
}
