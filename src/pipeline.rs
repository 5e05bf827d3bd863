use std::io::Write;

use vault_client::{SessionToken, VaultApi};

use crate::error::Error;
use crate::output::{OutputSink, ResolvedAssignment};
use crate::reference::{self, SecretReference};

/// Counters reported once a pass completes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolveSummary {
    pub scanned: usize,
    pub resolved: usize,
}

/// Current process environment as `KEY=VALUE` entries.
///
/// Entries that are not valid UTF-8 cannot hold a reference and are skipped.
pub fn process_environment() -> Vec<String> {
    std::env::vars_os()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some(format!("{}={}", key, value)),
            (key, _) => {
                tracing::debug!(key = ?key, "Skipping non UTF-8 environment entry");
                None
            }
        })
        .collect()
}

/// Resolve every secret reference in `environment` and write one export per
/// reference to `sink`, then close the sink.
///
/// Stops at the first error; lines already written stay written.
pub async fn resolve<I, W>(
    environment: I,
    token: &SessionToken,
    api: &dyn VaultApi,
    mut sink: OutputSink<W>,
) -> Result<ResolveSummary, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    W: Write,
{
    let mut summary = ResolveSummary::default();

    for entry in environment {
        summary.scanned += 1;

        let reference = match reference::parse(entry.as_ref())? {
            Some(reference) => reference,
            None => continue,
        };

        let assignment = fetch(&reference, token, api).await?;
        sink.write_assignment(&assignment)?;

        tracing::debug!(
            key = %reference.env_key,
            path = %reference.store_path,
            field = %reference.field_name,
            "Resolved secret reference"
        );
    }

    summary.resolved = sink.lines_written();
    sink.finish()?;
    Ok(summary)
}

async fn fetch(
    reference: &SecretReference,
    token: &SessionToken,
    api: &dyn VaultApi,
) -> Result<ResolvedAssignment, Error> {
    let secret = api
        .read(&reference.store_path, token.as_str())
        .await
        .map_err(|source| Error::StoreRead {
            key: reference.env_key.clone(),
            path: reference.store_path.clone(),
            source,
        })?;

    let value = secret
        .field(&reference.field_name)
        .ok_or_else(|| Error::FieldNotFound {
            key: reference.env_key.clone(),
            path: reference.store_path.clone(),
            field: reference.field_name.clone(),
        })?;

    Ok(ResolvedAssignment {
        env_key: reference.env_key.clone(),
        value: render_value(value),
    })
}

/// Strings are exported as-is, anything else in compact JSON form
fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
