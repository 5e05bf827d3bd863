use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use vault_client::auth::DEFAULT_JWT_PATH;

use crate::error::{AuthError, ConfigError, Error};

/// Command line, as typed by the user. Validated once into [`Config`].
#[derive(Debug, Parser)]
#[command(name = "vault-env")]
#[command(about = "Resolve vault:PATH:FIELD references in the environment into shell exports")]
#[command(version)]
pub struct Cli {
    /// Print exports to stdout instead of writing the output file
    #[arg(long)]
    pub debug: bool,

    /// Vault http timeout (e.g. 500ms, 10s, 1m)
    #[arg(long = "http.timeout", default_value = "10s", value_parser = parse_duration)]
    pub http_timeout: Duration,

    /// Vault auth mode: token, login or k8s
    #[arg(long = "vault.mode", default_value = "token")]
    pub vault_mode: String,

    /// Vault auth login
    #[arg(long = "vault.auth.login", env = "VAULT_LOGIN")]
    pub vault_auth_login: Option<String>,

    /// Vault auth password
    #[arg(long = "vault.auth.password", env = "VAULT_PASSWORD", hide_env_values = true)]
    pub vault_auth_password: Option<String>,

    /// Vault address
    #[arg(long = "vault.address", env = "VAULT_ADDR")]
    pub vault_address: Option<String>,

    /// Vault token
    #[arg(long = "vault.token", env = "VAULT_TOKEN", hide_env_values = true)]
    pub vault_token: Option<String>,

    /// Vault k8s role
    #[arg(long = "vault.k8s.role", default_value = "default")]
    pub vault_k8s_role: String,

    /// Path of the Kubernetes service account token
    #[arg(
        long = "vault.k8s.token-path",
        env = "K8S_JWT_TOKEN_PATH",
        default_value = DEFAULT_JWT_PATH
    )]
    pub vault_k8s_token_path: PathBuf,

    /// File receiving the generated exports
    #[arg(long, default_value = "vault-env")]
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Token,
    UserPassLogin,
    KubernetesServiceAccount,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::UserPassLogin => "login",
            Self::KubernetesServiceAccount => "k8s",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMode {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "token" => Ok(Self::Token),
            "login" => Ok(Self::UserPassLogin),
            "k8s" => Ok(Self::KubernetesServiceAccount),
            other => Err(AuthError::UnsupportedMode(other.to_string())),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Token { token: String },
    UserPass { username: String, password: String },
    Kubernetes { role: String, jwt_path: PathBuf },
}

impl Credentials {
    pub fn mode(&self) -> AuthMode {
        match self {
            Self::Token { .. } => AuthMode::Token,
            Self::UserPass { .. } => AuthMode::UserPassLogin,
            Self::Kubernetes { .. } => AuthMode::KubernetesServiceAccount,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token { .. } => f.debug_struct("Token").finish_non_exhaustive(),
            Self::UserPass { username, .. } => f
                .debug_struct("UserPass")
                .field("username", username)
                .finish_non_exhaustive(),
            Self::Kubernetes { role, jwt_path } => f
                .debug_struct("Kubernetes")
                .field("role", role)
                .field("jwt_path", jwt_path)
                .finish(),
        }
    }
}

/// Immutable run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub debug: bool,
    pub http_timeout: Duration,
    pub vault_address: String,
    pub credentials: Credentials,
    pub output: PathBuf,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, Error> {
        let mode: AuthMode = cli.vault_mode.parse()?;

        if cli.http_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(cli.http_timeout).into());
        }

        let vault_address = non_empty(cli.vault_address).ok_or(ConfigError::MissingAddress)?;

        let credentials = match mode {
            AuthMode::Token => Credentials::Token {
                token: required(cli.vault_token, mode, "--vault.token")?,
            },
            AuthMode::UserPassLogin => Credentials::UserPass {
                username: required(cli.vault_auth_login, mode, "--vault.auth.login")?,
                password: required(cli.vault_auth_password, mode, "--vault.auth.password")?,
            },
            AuthMode::KubernetesServiceAccount => Credentials::Kubernetes {
                role: required(Some(cli.vault_k8s_role), mode, "--vault.k8s.role")?,
                jwt_path: cli.vault_k8s_token_path,
            },
        };

        Ok(Self {
            debug: cli.debug,
            http_timeout: cli.http_timeout,
            vault_address,
            credentials,
            output: cli.output,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(
    value: Option<String>,
    mode: AuthMode,
    flag: &'static str,
) -> Result<String, ConfigError> {
    non_empty(value).ok_or(ConfigError::MissingCredential { mode, flag })
}

/// Parse durations such as `250ms`, `10s`, `1.5m` or `1h`. A bare number means seconds.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(raw.len());
    let (number, unit) = raw.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| format!("invalid duration {:?}", raw))?;

    let secs = match unit {
        "ms" => value / 1000.0,
        "" | "s" => value,
        "m" => value * 60.0,
        "h" => value * 3600.0,
        other => return Err(format!("unknown duration unit {:?} in {:?}", other, raw)),
    };

    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid duration {:?}: {}", raw, e))
}
