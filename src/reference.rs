//! Grammar for secret references carried in environment entries.
//!
//! ```text
//! entry     = env-key "=" reference
//! reference = "vault:" store-path ":" field-name [ ":" ignored ]
//! ```
//!
//! Entries that do not contain `=vault:` at all are not references and are
//! left alone. Entries that contain the marker but do not follow the grammar
//! are rejected rather than guessed at.

use crate::error::ParseError;

const MARKER: &str = "vault";
const ENTRY_MARKER: &str = "=vault:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretReference {
    pub env_key: String,
    pub store_path: String,
    pub field_name: String,
}

/// Parse one `KEY=VALUE` environment entry.
///
/// Returns `Ok(None)` for entries that are not secret references.
pub fn parse(entry: &str) -> Result<Option<SecretReference>, ParseError> {
    if !entry.contains(ENTRY_MARKER) {
        return Ok(None);
    }

    let (env_key, value) = match entry.split_once('=') {
        Some(pair) => pair,
        None => return Ok(None),
    };

    let malformed = |reason: &'static str| ParseError {
        key: env_key.to_string(),
        reason,
    };

    if env_key.is_empty() {
        return Err(malformed("empty variable name"));
    }

    let mut segments = value.splitn(4, ':');
    let marker = segments.next().unwrap_or_default();
    if marker != MARKER {
        return Err(malformed("value must start with vault:"));
    }

    let store_path = segments
        .next()
        .ok_or_else(|| malformed("missing store path"))?;
    let field_name = segments
        .next()
        .ok_or_else(|| malformed("expected vault:PATH:FIELD"))?;

    if store_path.is_empty() {
        return Err(malformed("empty store path"));
    }
    if field_name.is_empty() {
        return Err(malformed("empty field name"));
    }

    Ok(Some(SecretReference {
        env_key: env_key.to_string(),
        store_path: store_path.to_string(),
        field_name: field_name.to_string(),
    }))
}
