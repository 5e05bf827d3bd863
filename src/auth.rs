use vault_client::{
    AuthMethod, KubernetesAuth, SessionToken, StaticTokenAuth, UserpassAuth, VaultApi,
};

use crate::config::Credentials;
use crate::error::AuthError;

fn auth_method(credentials: &Credentials) -> Box<dyn AuthMethod> {
    match credentials {
        Credentials::Token { token } => Box::new(StaticTokenAuth::new(token.clone())),
        Credentials::UserPass { username, password } => {
            Box::new(UserpassAuth::new(username.clone(), password.clone()))
        }
        Credentials::Kubernetes { role, jwt_path } => {
            Box::new(KubernetesAuth::new(role.clone()).with_jwt_path(jwt_path.clone()))
        }
    }
}

/// Obtain the session token used for every subsequent read
pub async fn authenticate(
    credentials: &Credentials,
    api: &dyn VaultApi,
) -> Result<SessionToken, AuthError> {
    let method = auth_method(credentials);
    tracing::info!(mode = method.name(), "Authenticating to Vault");

    method
        .authenticate(api)
        .await
        .map_err(|source| AuthError::Rejected {
            mode: credentials.mode(),
            source,
        })
}
