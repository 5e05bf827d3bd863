use vault_client::VaultClient;

use crate::auth::authenticate;
use crate::config::Config;
use crate::error::{ConfigError, Error};
use crate::output::OutputSink;
use crate::pipeline::{self, ResolveSummary};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Authenticate, then resolve the current process environment
pub async fn run(config: &Config) -> Result<ResolveSummary, Error> {
    run_with_environment(config, pipeline::process_environment()).await
}

pub async fn run_with_environment<I>(config: &Config, environment: I) -> Result<ResolveSummary, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let client = VaultClient::builder()
        .base_url(config.vault_address.as_str())
        .timeout(config.http_timeout)
        .application_name(USER_AGENT)
        .build()
        .map_err(ConfigError::Client)?;
    tracing::debug!(address = client.base_url(), timeout = ?config.http_timeout, "Vault client ready");

    let token = authenticate(&config.credentials, &client).await?;

    // The output file is only touched once authentication succeeded.
    let summary = if config.debug {
        pipeline::resolve(environment, &token, &client, OutputSink::console()).await?
    } else {
        let sink = OutputSink::create(&config.output)?;
        pipeline::resolve(environment, &token, &client, sink).await?
    };

    tracing::info!(
        scanned = summary.scanned,
        resolved = summary.resolved,
        debug = config.debug,
        output = %config.output.display(),
        "Environment resolved"
    );

    Ok(summary)
}
