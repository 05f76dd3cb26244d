//! Serde helpers for the export response boundary

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialize Option<T> as null when None (don't skip the field)
pub fn serialize_option_as_null<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_some(v),
        None => serializer.serialize_none(),
    }
}

/// Deserialize an optional string, folding `""` into `None`
///
/// The page treats an empty message or filename the same as a missing one.
pub fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Deserialize a user-facing message leniently
///
/// Strings are kept, non-zero numbers and `true` are shown as their JSON
/// text; falsy values (`""`, `0`, `false`, `null`) and containers become
/// `None`. A badly typed message never invalidates the rest of the response.
pub fn deserialize_lenient_message<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        serde_json::Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}
