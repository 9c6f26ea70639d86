//! `burnweb` command line client.
//!
//! See [`config`] for flags and environment variables.

mod config;
mod run;

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
