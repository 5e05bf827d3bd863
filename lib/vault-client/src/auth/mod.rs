mod kubernetes;
mod session;
mod token;
mod userpass;

pub use kubernetes::{DEFAULT_JWT_PATH, KubernetesAuth};
pub use session::SessionToken;
pub use token::StaticTokenAuth;
pub use userpass::UserpassAuth;

use crate::VaultApi;
use crate::VaultError;
use async_trait::async_trait;

/// Trait for authentication methods
#[async_trait]
pub trait AuthMethod: Send + Sync {
    /// Exchange the configured credentials for a session token
    async fn authenticate(&self, api: &dyn VaultApi) -> Result<SessionToken, VaultError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
