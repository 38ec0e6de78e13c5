//! Validated custom-attribute map for directory users.
//!
//! This module provides [`AttributeMap`], a typed map that guarantees the
//! attribute constraints the remote directory enforces:
//!
//! - at most 100 entries
//! - keys contain neither `.` nor `$`
//! - keys are at most 190 characters long
//! - every value is a present scalar (string, number, or boolean)
//!
//! The invariants hold at construction, insertion, and deserialization
//! time, so an invalid map is rejected before any network call is made.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{Error, ValidationError};

/// Maximum number of custom attributes the remote accepts per user.
pub const MAX_ATTRIBUTES: usize = 100;

/// Maximum length of a custom attribute key.
pub const MAX_KEY_LENGTH: usize = 190;

/// A scalar attribute value.
///
/// The remote stores custom attributes as flat scalars; nested values and
/// nulls are rejected at validation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A boolean value.
    Bool(bool),
}

impl AttributeValue {
    /// Returns the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        AttributeValue::Integer(n)
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Float(n)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

/// A validated map of custom attributes.
///
/// # Example
///
/// ```
/// use memberlink_core::AttributeMap;
///
/// let mut attrs = AttributeMap::new();
/// attrs.insert("forums_member", "https://forum.example.com/profile/alice/").unwrap();
///
/// assert!(attrs.insert("bad.key", "value").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap(BTreeMap<String, AttributeValue>);

impl AttributeMap {
    /// Create an empty attribute map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build a validated map from raw JSON object entries.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the map has more than 100 entries,
    /// a key contains `.` or `$`, a key exceeds 190 characters, a value is
    /// null, or a value is not a scalar.
    pub fn from_json(map: serde_json::Map<String, Value>) -> Result<Self, Error> {
        if map.len() > MAX_ATTRIBUTES {
            return Err(ValidationError::TooManyAttributes { count: map.len() }.into());
        }

        let mut attrs = BTreeMap::new();
        for (key, value) in map {
            validate_key(&key)?;
            let value = convert_value(&key, value)?;
            attrs.insert(key, value);
        }

        Ok(Self(attrs))
    }

    /// Insert an attribute, validating the key and the entry count.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the key is invalid or the map is
    /// already at 100 entries.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Result<(), Error> {
        let key = key.into();
        validate_key(&key)?;

        if !self.0.contains_key(&key) && self.0.len() >= MAX_ATTRIBUTES {
            return Err(ValidationError::TooManyAttributes {
                count: self.0.len() + 1,
            }
            .into());
        }

        self.0.insert(key, value.into());
        Ok(())
    }

    /// Get an attribute value by key.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    /// Returns true if the map contains the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of attributes in the map.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.0.iter()
    }
}

fn validate_key(key: &str) -> Result<(), ValidationError> {
    if key.contains('.') || key.contains('$') {
        return Err(ValidationError::InvalidKey {
            key: key.to_string(),
        });
    }

    // Character count, not bytes; a multibyte key under the limit is fine.
    let len = key.chars().count();
    if len > MAX_KEY_LENGTH {
        return Err(ValidationError::KeyTooLong { len });
    }

    Ok(())
}

fn convert_value(key: &str, value: Value) -> Result<AttributeValue, ValidationError> {
    match value {
        Value::String(s) => Ok(AttributeValue::String(s)),
        Value::Bool(b) => Ok(AttributeValue::Bool(b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(AttributeValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(AttributeValue::Float(f))
            } else {
                Err(ValidationError::UnsupportedValue {
                    key: key.to_string(),
                })
            }
        }
        Value::Null => Err(ValidationError::NullValue {
            key: key.to_string(),
        }),
        Value::Array(_) | Value::Object(_) => Err(ValidationError::UnsupportedValue {
            key: key.to_string(),
        }),
    }
}

impl Serialize for AttributeMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttributeMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = serde_json::Map::deserialize(deserializer)?;
        AttributeMap::from_json(map).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn as_json_map(value: Value) -> serde_json::Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn insert_and_get() {
        let mut attrs = AttributeMap::new();
        attrs.insert("forums_member", "https://x.test/profile/a/").unwrap();

        assert_eq!(
            attrs.get("forums_member").and_then(AttributeValue::as_str),
            Some("https://x.test/profile/a/")
        );
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn rejects_key_with_period() {
        let mut attrs = AttributeMap::new();
        let err = attrs.insert("bad.key", "v").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidKey { .. })
        ));
    }

    #[test]
    fn rejects_key_with_dollar() {
        let mut attrs = AttributeMap::new();
        assert!(attrs.insert("bad$key", "v").is_err());
    }

    #[test]
    fn rejects_key_of_length_191() {
        let mut attrs = AttributeMap::new();
        let key = "k".repeat(191);
        let err = attrs.insert(key, "v").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::KeyTooLong { len: 191 })
        ));
    }

    #[test]
    fn accepts_key_of_length_190() {
        let mut attrs = AttributeMap::new();
        assert!(attrs.insert("k".repeat(190), "v").is_ok());
    }

    #[test]
    fn key_length_counts_characters_not_bytes() {
        let mut attrs = AttributeMap::new();

        // 190 two-byte characters: over the limit in bytes, not in chars.
        assert!(attrs.insert("é".repeat(190), "v").is_ok());

        let err = attrs.insert("é".repeat(191), "v").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::KeyTooLong { len: 191 })
        ));
    }

    #[test]
    fn rejects_101st_attribute() {
        let mut attrs = AttributeMap::new();
        for i in 0..100 {
            attrs.insert(format!("key_{}", i), i as i64).unwrap();
        }

        let err = attrs.insert("one_too_many", "v").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::TooManyAttributes { count: 101 })
        ));

        // Overwriting an existing key is still fine at the limit.
        assert!(attrs.insert("key_0", "updated").is_ok());
    }

    #[test]
    fn rejects_null_value() {
        let map = as_json_map(json!({ "field": null }));
        let err = AttributeMap::from_json(map).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NullValue { .. })
        ));
    }

    #[test]
    fn rejects_nested_value() {
        let map = as_json_map(json!({ "field": { "nested": 1 } }));
        assert!(AttributeMap::from_json(map).is_err());
    }

    #[test]
    fn from_json_scalars() {
        let map = as_json_map(json!({
            "name": "alice",
            "visits": 3,
            "score": 1.5,
            "active": true
        }));
        let attrs = AttributeMap::from_json(map).unwrap();

        assert_eq!(attrs.get("visits"), Some(&AttributeValue::Integer(3)));
        assert_eq!(attrs.get("score"), Some(&AttributeValue::Float(1.5)));
        assert_eq!(attrs.get("active"), Some(&AttributeValue::Bool(true)));
    }

    #[test]
    fn deserialize_rejects_null() {
        let result: Result<AttributeMap, _> = serde_json::from_str(r#"{"field": null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serialize_roundtrip() {
        let mut attrs = AttributeMap::new();
        attrs.insert("visits", 3i64).unwrap();
        attrs.insert("name", "alice").unwrap();

        let value = serde_json::to_value(&attrs).unwrap();
        assert_eq!(value, json!({ "name": "alice", "visits": 3 }));
    }
}
