//! vault-client - minimal client for the HashiCorp Vault logical API
//!
//! Supported authentication methods:
//! 1. static token (no login exchange)
//! 2. userpass login (`auth/userpass/login/<username>`)
//! 3. Kubernetes service account login (`auth/kubernetes/login`)

pub mod auth;
mod client;
mod error;
mod models;

pub use auth::{AuthMethod, KubernetesAuth, SessionToken, StaticTokenAuth, UserpassAuth};
pub use client::{VaultApi, VaultClient, VaultClientBuilder};
pub use error::VaultError;
pub use models::{AuthInfo, KvView, LoginResponse, Secret};
