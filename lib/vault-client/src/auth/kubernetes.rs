use super::{AuthMethod, SessionToken};
use crate::{VaultApi, VaultError};
use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_JWT_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";
const DEFAULT_MOUNT: &str = "kubernetes";

/// Kubernetes service account authentication
pub struct KubernetesAuth {
    pub mount: String,
    pub role: String,
    pub jwt_path: PathBuf,
}

impl KubernetesAuth {
    pub fn new(role: String) -> Self {
        Self {
            mount: DEFAULT_MOUNT.to_string(),
            role,
            jwt_path: PathBuf::from(DEFAULT_JWT_PATH),
        }
    }

    pub fn with_jwt_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.jwt_path = path.into();
        self
    }

    pub fn login_path(&self) -> String {
        format!("auth/{}/login", self.mount)
    }

    async fn read_jwt(&self) -> Result<String, VaultError> {
        tokio::fs::read_to_string(&self.jwt_path)
            .await
            .map(|s| s.trim().to_string())
            .map_err(|e| {
                VaultError::KubernetesError(format!(
                    "Failed to read JWT from {}: {}",
                    self.jwt_path.display(),
                    e
                ))
            })
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    role: &'a str,
    jwt: &'a str,
}

#[async_trait]
impl AuthMethod for KubernetesAuth {
    async fn authenticate(&self, api: &dyn VaultApi) -> Result<SessionToken, VaultError> {
        let jwt = self.read_jwt().await?;
        if jwt.is_empty() {
            return Err(VaultError::KubernetesError(format!(
                "service account token at {} is empty",
                self.jwt_path.display()
            )));
        }

        let payload = serde_json::to_value(LoginRequest {
            role: &self.role,
            jwt: &jwt,
        })
        .map_err(|e| VaultError::KubernetesError(e.to_string()))?;

        let auth = api.login(&self.login_path(), &payload).await?;
        tracing::debug!(role = %self.role, policies = ?auth.policies, "kubernetes login succeeded");

        Ok(SessionToken::new(auth.client_token))
    }

    fn name(&self) -> &'static str {
        "k8s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VaultClient;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_read_jwt_trims_whitespace() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  my-jwt-token ").unwrap();

        let auth = KubernetesAuth::new("app".to_string())
            .with_jwt_path(file.path());

        let jwt = auth.read_jwt().await.unwrap();
        assert_eq!(jwt, "my-jwt-token");
    }

    #[tokio::test]
    async fn test_read_jwt_missing_file() {
        let auth =
            KubernetesAuth::new("app".to_string()).with_jwt_path("/nonexistent/path");

        let result = auth.read_jwt().await;
        assert!(matches!(result, Err(VaultError::KubernetesError(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_utf8_jwt_path_is_read_verbatim() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"token-\xff"));
        if std::fs::write(&path, "jwt-bytes\n").is_err() {
            // Filesystem refuses non UTF-8 names.
            return;
        }

        let auth = KubernetesAuth::new("app".to_string()).with_jwt_path(path);

        assert_eq!(auth.read_jwt().await.unwrap(), "jwt-bytes");
    }

    #[tokio::test]
    async fn test_login_posts_role_and_jwt() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "jwt-body").unwrap();

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/auth/kubernetes/login"))
            .and(body_json(serde_json::json!({"role": "default", "jwt": "jwt-body"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "auth": {"client_token": "s.k8s", "policies": ["default"]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = VaultClient::builder().base_url(server.uri()).build().unwrap();
        let auth = KubernetesAuth::new("default".to_string())
            .with_jwt_path(file.path());

        let token = auth.authenticate(&client).await.unwrap();
        assert_eq!(token.as_str(), "s.k8s");
    }
}
