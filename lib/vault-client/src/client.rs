use crate::error::VaultError;
use crate::models::{AuthInfo, LoginResponse, Secret};
use async_trait::async_trait;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Logical API surface used by the auth methods and secret readers
#[async_trait]
pub trait VaultApi: Send + Sync {
    /// Unauthenticated write to a login endpoint, e.g. `auth/kubernetes/login`
    async fn login(&self, path: &str, payload: &serde_json::Value)
    -> Result<AuthInfo, VaultError>;

    /// Read a secret at `path` using `token` as the bearer credential
    async fn read(&self, path: &str, token: &str) -> Result<Secret, VaultError>;
}

pub struct VaultClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    application_name: Option<String>,
}

impl Default for VaultClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VaultClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            application_name: None,
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Client-wide timeout applied to every request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    pub fn build(self) -> Result<VaultClient, VaultError> {
        let base_url = self
            .base_url
            .filter(|url| !url.is_empty())
            .ok_or(VaultError::VaultNotDetected)?;

        let mut http = reqwest::Client::builder().timeout(self.timeout);
        if let Some(app_name) = self.application_name {
            http = http.user_agent(app_name);
        }
        let http = http
            .build()
            .map_err(|e| VaultError::RequestError(e.to_string()))?;

        Ok(VaultClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

pub struct VaultClient {
    base_url: String,
    http: reqwest::Client,
}

impl VaultClient {
    pub fn builder() -> VaultClientBuilder {
        VaultClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn error_from(response: reqwest::Response) -> VaultError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        VaultError::ClientError {
            status,
            message: body,
        }
    }
}

#[async_trait]
impl VaultApi for VaultClient {
    async fn login(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<AuthInfo, VaultError> {
        let response = self
            .http
            .post(self.url(path))
            .json(payload)
            .send()
            .await
            .map_err(|e| VaultError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| VaultError::InvalidResponse(e.to_string()))?;

        match login.auth {
            Some(auth) if !auth.client_token.is_empty() => Ok(auth),
            _ => Err(VaultError::AuthError(format!(
                "no client token in response from {}",
                path
            ))),
        }
    }

    async fn read(&self, path: &str, token: &str) -> Result<Secret, VaultError> {
        let response = self
            .http
            .get(self.url(path))
            .header("X-Vault-Token", token)
            .send()
            .await
            .map_err(|e| VaultError::RequestError(e.to_string()))?;

        if response.status().as_u16() == 404 {
            return Err(VaultError::SecretNotFound {
                path: path.to_string(),
            });
        }

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| VaultError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_builder_defaults() {
        let builder = VaultClientBuilder::new();
        assert!(builder.base_url.is_none());
        assert_eq!(builder.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = VaultClient::builder()
            .base_url("http://vault:8200/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://vault:8200");
        assert_eq!(client.url("/secret/data/db"), "http://vault:8200/v1/secret/data/db");
    }

    #[test]
    fn test_builder_requires_explicit_address() {
        // The builder never reads VAULT_ADDR itself; callers pass the address.
        let result = VaultClient::builder().build();
        assert!(matches!(result, Err(VaultError::VaultNotDetected)));
    }

    #[test]
    fn test_builder_rejects_empty_address() {
        let result = VaultClient::builder().base_url("").build();
        assert!(matches!(result, Err(VaultError::VaultNotDetected)));
    }

    #[tokio::test]
    async fn test_login_returns_auth_info() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/userpass/login/alice"))
            .and(body_json(serde_json::json!({"password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "auth": {"client_token": "s.alice", "lease_duration": 3600, "renewable": true}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = VaultClient::builder().base_url(server.uri()).build().unwrap();
        let auth = client
            .login("auth/userpass/login/alice", &serde_json::json!({"password": "pw"}))
            .await
            .unwrap();

        assert_eq!(auth.client_token, "s.alice");
        assert_eq!(auth.lease_duration, 3600);
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/userpass/login/alice"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid username or password"))
            .mount(&server)
            .await;

        let client = VaultClient::builder().base_url(server.uri()).build().unwrap();
        let err = client
            .login("auth/userpass/login/alice", &serde_json::json!({"password": "bad"}))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("invalid username or password"));
    }

    #[tokio::test]
    async fn test_login_without_auth_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"auth": null})))
            .mount(&server)
            .await;

        let client = VaultClient::builder().base_url(server.uri()).build().unwrap();
        let err = client
            .login("auth/kubernetes/login", &serde_json::json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, VaultError::AuthError(_)));
    }

    #[tokio::test]
    async fn test_read_sends_token_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/secret/data/db"))
            .and(header("X-Vault-Token", "s.reader"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"data": {"password": "s3cr3t"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = VaultClient::builder().base_url(server.uri()).build().unwrap();
        let secret = client.read("secret/data/db", "s.reader").await.unwrap();

        assert_eq!(secret.field("password").unwrap(), "s3cr3t");
    }

    #[tokio::test]
    async fn test_read_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/secret/data/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({"errors": []})))
            .mount(&server)
            .await;

        let client = VaultClient::builder().base_url(server.uri()).build().unwrap();
        let err = client.read("secret/data/missing", "t").await.unwrap_err();

        assert!(matches!(err, VaultError::SecretNotFound { ref path } if path == "secret/data/missing"));
    }

    #[tokio::test]
    async fn test_read_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
            .mount(&server)
            .await;

        let client = VaultClient::builder().base_url(server.uri()).build().unwrap();
        let err = client.read("secret/data/db", "expired").await.unwrap_err();

        assert_eq!(err.status(), Some(403));
    }
}
