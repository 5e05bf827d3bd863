use std::io;

use thiserror::Error;
use vault_client::VaultError;

use crate::config::AuthMode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Vault address is not set (--vault.address or VAULT_ADDR)")]
    MissingAddress,

    #[error("{flag} is required in {mode} auth mode")]
    MissingCredential { mode: AuthMode, flag: &'static str },

    #[error("Invalid http timeout: {0:?}")]
    InvalidTimeout(std::time::Duration),

    #[error("Unable to build Vault client: {0}")]
    Client(#[source] VaultError),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unknown auth mode: {0:?} (expected token, login or k8s)")]
    UnsupportedMode(String),

    #[error("Vault {mode} authentication failed: {source}")]
    Rejected {
        mode: AuthMode,
        #[source]
        source: VaultError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Malformed secret reference in {key}: {reason}")]
pub struct ParseError {
    pub key: String,
    pub reason: &'static str,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Unable to read {path} for {key}: {source}")]
    StoreRead {
        key: String,
        path: String,
        #[source]
        source: VaultError,
    },

    #[error("Field {field} not found in {path} (referenced by {key})")]
    FieldNotFound {
        key: String,
        path: String,
        field: String,
    },

    #[error("Unable to write output: {0}")]
    Output(#[from] io::Error),
}
