//! Lenient deserializers for third-party payloads.
//!
//! Senders routinely emit `null` where a value is optional, and `null` entries
//! inside arrays. Everything here maps those shapes onto empty values instead
//! of failing the whole document.

use hooks_common::json;
use serde::de::{self, Deserialize, DeserializeOwned, Deserializer, Unexpected};
use serde_json::{Map, Value};

/// Decode `T`, treating `null` the same as a missing value.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode an array of objects into `T`s, dropping entries that are `null`.
///
/// A `null` or missing array decodes to an empty vector. Each nesting level
/// that uses this function drops its own nulls, so one array's nulls never
/// affect a sibling or an enclosing array. Entries that are neither `null`
/// nor an object are rejected.
pub fn skip_null_objects<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries: Vec<Option<Map<String, Value>>> = null_as_default(deserializer)?;
    let total = entries.len();
    let kept = entries
        .into_iter()
        .flatten()
        .map(|entry| json::from_object(entry).map_err(<D::Error as de::Error>::custom))
        .collect::<Result<Vec<T>, D::Error>>()?;

    if kept.len() < total {
        tracing::debug!(dropped = total - kept.len(), "Dropped null array entries");
    }

    Ok(kept)
}

/// Decode a string, number or boolean into its textual form.
pub fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(de::Error::invalid_type(
            unexpected(&other),
            &"a string, number or boolean",
        )),
    }
}

/// Decode a boolean that may also arrive as the string `"true"` or `"false"`.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::String(s)) => match s.as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            other => Err(de::Error::invalid_value(
                Unexpected::Str(other),
                &"\"true\" or \"false\"",
            )),
        },
        Some(other) => Err(de::Error::invalid_type(unexpected(&other), &"a boolean")),
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}
