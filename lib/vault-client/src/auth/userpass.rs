use super::{AuthMethod, SessionToken};
use crate::{VaultApi, VaultError};
use async_trait::async_trait;
use serde::Serialize;

const DEFAULT_MOUNT: &str = "userpass";

/// Username/password authentication
pub struct UserpassAuth {
    pub mount: String,
    pub username: String,
    password: String,
}

impl UserpassAuth {
    pub fn new(username: String, password: String) -> Self {
        Self {
            mount: DEFAULT_MOUNT.to_string(),
            username,
            password,
        }
    }

    pub fn login_path(&self) -> String {
        format!("auth/{}/login/{}", self.mount, self.username)
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
}

#[async_trait]
impl AuthMethod for UserpassAuth {
    async fn authenticate(&self, api: &dyn VaultApi) -> Result<SessionToken, VaultError> {
        let payload = serde_json::to_value(LoginRequest {
            password: &self.password,
        })
        .map_err(|e| VaultError::AuthError(e.to_string()))?;

        let auth = api.login(&self.login_path(), &payload).await?;
        tracing::debug!(username = %self.username, policies = ?auth.policies, "userpass login succeeded");

        Ok(SessionToken::new(auth.client_token))
    }

    fn name(&self) -> &'static str {
        "login"
    }
}
