//! Directory user record and lookup query types.

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeMap;
use crate::error::{Error, InvalidInputError};

/// A user record in the CRM contact directory.
///
/// `id` is assigned by the directory and immutable once created; `user_id`
/// is the external identifier the forum knows the user by. Absent fields
/// are omitted from the wire body, which gives the upsert endpoint its
/// create-vs-update semantics: a body without `id` creates (or matches by
/// email / `user_id`), a body with `id` updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Directory-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// External (forum-side) user identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// E-mail address. Not necessarily unique in the directory.
    pub email: String,

    /// Custom attributes, validated against the remote's constraints.
    #[serde(default, skip_serializing_if = "AttributeMap::is_empty")]
    pub custom_attributes: AttributeMap,
}

impl DirectoryUser {
    /// Create a bare user record carrying only an email address.
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: None,
            email: email.into(),
            custom_attributes: AttributeMap::new(),
        }
    }

    /// The stored value of a string attribute, if present.
    pub fn string_attribute(&self, key: &str) -> Option<&str> {
        self.custom_attributes.get(key).and_then(|v| v.as_str())
    }
}

/// A lookup query for the view operation.
///
/// Exactly one lookup path executes, in priority order: `id`, then
/// `user_id`, then `email`. A query with none of the three set is invalid.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    /// Directory-assigned identifier.
    pub id: Option<String>,
    /// External (forum-side) user identifier.
    pub user_id: Option<String>,
    /// E-mail address.
    pub email: Option<String>,
}

impl ViewQuery {
    /// Query by directory id.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Query by external user id.
    pub fn by_user_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Default::default()
        }
    }

    /// Query by email address.
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    /// Validate that at least one lookup field is populated.
    pub fn validate(&self) -> Result<(), Error> {
        let populated = [&self.id, &self.user_id, &self.email]
            .into_iter()
            .any(|f| f.as_deref().is_some_and(|v| !v.is_empty()));

        if populated {
            Ok(())
        } else {
            Err(InvalidInputError::EmptyQuery.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_without_absent_fields() {
        let user = DirectoryUser::with_email("a@x.com");
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value, json!({ "email": "a@x.com" }));
    }

    #[test]
    fn serializes_id_when_present() {
        let mut user = DirectoryUser::with_email("a@x.com");
        user.id = Some("530470".to_string());
        user.custom_attributes
            .insert("forums_member", "https://f.test/profile/a/")
            .unwrap();

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "530470",
                "email": "a@x.com",
                "custom_attributes": { "forums_member": "https://f.test/profile/a/" }
            })
        );
    }

    #[test]
    fn deserializes_listing_entry() {
        let user: DirectoryUser = serde_json::from_value(json!({
            "id": "530470",
            "user_id": "25",
            "email": "a@x.com",
            "custom_attributes": { "forums_member": "https://f.test/profile/a/" }
        }))
        .unwrap();

        assert_eq!(user.id.as_deref(), Some("530470"));
        assert_eq!(
            user.string_attribute("forums_member"),
            Some("https://f.test/profile/a/")
        );
    }

    #[test]
    fn empty_query_is_invalid() {
        assert!(ViewQuery::default().validate().is_err());
        assert!(ViewQuery::by_email("a@x.com").validate().is_ok());
    }

    #[test]
    fn query_with_empty_string_is_invalid() {
        let query = ViewQuery {
            email: Some(String::new()),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }
}
