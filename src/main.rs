#![warn(rust_2018_idioms)]

use std::process::ExitCode;

use clap::Parser;

use vault_env::{Cli, Config, Error, ResolveSummary};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = vault_env::logging::init_logger();

    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "vault-env failed");
            eprintln!("vault-env: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ResolveSummary, Error> {
    let config = Config::from_cli(cli)?;
    tracing::debug!(?config, "Starting");
    vault_env::run(&config).await
}
