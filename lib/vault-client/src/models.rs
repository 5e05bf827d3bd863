use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response body of any `auth/*/login` write
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub auth: Option<AuthInfo>,
}

/// Authentication record issued by Vault on login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthInfo {
    pub client_token: String,
    #[serde(default)]
    pub accessor: String,
    #[serde(default)]
    pub policies: Vec<String>,
    #[serde(default)]
    pub lease_duration: u64,
    #[serde(default)]
    pub renewable: bool,
}

/// Response body of a logical read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Secret {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub lease_duration: u64,
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

impl Secret {
    /// Key-value pairs stored in the secret.
    ///
    /// KV v2 nests the payload under `data.data`; a KV v1 mount returns it
    /// directly in `data`.
    pub fn kv_data(&self) -> KvView<'_> {
        match self.data.get("data") {
            Some(serde_json::Value::Object(nested)) => KvView::Nested(nested),
            _ => KvView::Flat(&self.data),
        }
    }

    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        match self.kv_data() {
            KvView::Nested(map) => map.get(name),
            KvView::Flat(map) => map.get(name),
        }
    }
}

/// Borrowed view over the key-value payload of a [`Secret`]
#[derive(Debug, Clone, Copy)]
pub enum KvView<'a> {
    Nested(&'a serde_json::Map<String, serde_json::Value>),
    Flat(&'a HashMap<String, serde_json::Value>),
}
