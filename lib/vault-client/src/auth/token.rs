use super::{AuthMethod, SessionToken};
use crate::{VaultApi, VaultError};
use async_trait::async_trait;

/// Static token authentication
pub struct StaticTokenAuth {
    token: String,
}

impl StaticTokenAuth {
    pub fn new(token: String) -> Self {
        Self { token }
    }
}

#[async_trait]
impl AuthMethod for StaticTokenAuth {
    async fn authenticate(&self, _api: &dyn VaultApi) -> Result<SessionToken, VaultError> {
        Ok(SessionToken::new(self.token.clone()))
    }

    fn name(&self) -> &'static str {
        "token"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VaultClient;

    #[tokio::test]
    async fn test_static_token_auth() {
        // Nothing listens here; a network call would fail the test.
        let client = VaultClient::builder()
            .base_url("http://127.0.0.1:1")
            .build()
            .unwrap();
        let auth = StaticTokenAuth::new("my-token".to_string());
        let token = auth.authenticate(&client).await.unwrap();
        assert_eq!(token.as_str(), "my-token");
    }
}
