use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::{BuildkiteError, Result};

/// Ordered key/value view of an environment.
pub type EnvMap = IndexMap<String, String>;

const ENTRY_FORM: &str = "'key=value'";

/// Join `KEY=value` entries into the newline separated blob mutations take.
pub fn encode_blob(entries: &[String]) -> String {
    entries.join("\n")
}

/// Split a newline separated blob back into its entries.
///
/// Empty segments, including the one a trailing newline leaves behind, are
/// not entries. An empty blob is an empty environment.
pub fn decode_blob(blob: &str) -> Vec<String> {
    blob.split('\n')
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Split an entry on its first `=`.
///
/// Values may themselves contain `=`; only a missing separator is an error.
pub fn split_entry(entry: &str) -> Result<(&str, &str)> {
    entry.split_once('=').ok_or_else(|| BuildkiteError::Format {
        entry: entry.to_string(),
        expected: ENTRY_FORM,
    })
}

/// Render a map as `KEY=value` entries, keeping the map's order.
///
/// A key or value holding `=` or a newline could not be read back as the
/// same pair, so such entries are rejected before anything is sent.
pub fn flatten_map(map: &EnvMap) -> Result<Vec<String>> {
    map.iter()
        .map(|(key, value)| {
            let entry = format!("{key}={value}");
            if key.contains(['=', '\n']) || value.contains(['=', '\n']) {
                return Err(BuildkiteError::Format {
                    entry,
                    expected: ENTRY_FORM,
                });
            }
            Ok(entry)
        })
        .collect()
}

/// Build a map from `KEY=value` entries.
///
/// Every entry must contain exactly one `=`. Entries with none or several
/// are rejected with an error naming the entry, since the map form cannot
/// tell which separator was meant.
pub fn expand_list(entries: &[String]) -> Result<EnvMap> {
    let mut result = EnvMap::with_capacity(entries.len());
    for entry in entries {
        let (key, value) = split_entry(entry)?;
        if value.contains('=') {
            return Err(BuildkiteError::Format {
                entry: entry.clone(),
                expected: ENTRY_FORM,
            });
        }
        result.insert(key.to_string(), value.to_string());
    }
    Ok(result)
}

/// Deserialize an environment that may arrive as a list, a blob or null.
pub fn deserialize_entries<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        List(Vec<String>),
        Blob(String),
    }

    Ok(match Option::<Wire>::deserialize(deserializer)? {
        Some(Wire::List(entries)) => entries,
        Some(Wire::Blob(blob)) => decode_blob(&blob),
        None => Vec::new(),
    })
}
