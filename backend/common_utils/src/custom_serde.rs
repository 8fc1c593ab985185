//! Custom serialization/deserialization implementations.

/// Accepts a JSON string, number, boolean or null and yields its text form.
///
/// Processors are inconsistent about quoting codes and ids; `1000` and
/// `"1000"` both become `Some("1000")`, `null` becomes `None`, booleans follow
/// the loose scripting convention (`true` is `"1"`, `false` is `""`).
pub mod optional_string_or_number {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text)),
            Some(Value::Number(number)) => Ok(Some(number.to_string())),
            Some(Value::Bool(flag)) => Ok(Some(if flag { "1" } else { "" }.to_string())),
            Some(other) => Err(D::Error::custom(format!(
                "expected a string or a number, found {other}"
            ))),
        }
    }

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_none(),
        }
    }
}

/// Same as [`optional_string_or_number`] for fields that must be present.
pub mod string_or_number {
    use serde::{de::Error as _, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        super::optional_string_or_number::deserialize(deserializer)?
            .ok_or_else(|| D::Error::custom("expected a string or a number, found null"))
    }

    pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }
}
