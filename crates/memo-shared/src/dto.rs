//! Data Transfer Objects - request types for the posts API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Body of create and update requests.
///
/// Both operations validate the full shape: `title` and `body` are required
/// even when updating.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PostPayload {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostPayload {
    /// Decode a request document field by field.
    ///
    /// A field holding a value of the wrong JSON type is reported by name
    /// alongside the usual required/length violations, instead of failing
    /// the whole document. A non-object document has none of its fields.
    pub fn from_json(document: Value) -> Result<Self, Vec<String>> {
        let mut object = match document {
            Value::Object(object) => object,
            _ => Map::new(),
        };
        let mut mistyped = Vec::new();

        let payload = Self {
            title: take_field(&mut object, "title", &mut mistyped),
            body: take_field(&mut object, "body", &mut mistyped),
            tags: take_field(&mut object, "tags", &mut mistyped),
        };

        let mut fields = payload.violations();
        fields.extend(mistyped);
        fields.sort();
        fields.dedup();

        if fields.is_empty() {
            Ok(payload)
        } else {
            Err(fields)
        }
    }

    /// Names of the fields that fail validation, sorted. Empty when valid.
    pub fn violations(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .into_keys()
                    .map(|field| field.to_string())
                    .collect();
                fields.sort();
                fields
            }
        }
    }
}

/// Remove `name` from `object` and decode it. `null` counts as absent.
fn take_field<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    name: &str,
    mistyped: &mut Vec<String>,
) -> Option<T> {
    let value = object.remove(name)?;
    match serde_json::from_value::<Option<T>>(value) {
        Ok(decoded) => decoded,
        Err(_) => {
            mistyped.push(name.to_string());
            None
        }
    }
}

/// Query string of the listing endpoint.
///
/// `page` stays raw so a malformed value is reported as a field violation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub tag: Option<String>,
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(json: &str) -> PostPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_complete_payload_is_valid() {
        let p = payload(r#"{"title":"T","body":"<p>b</p>","tags":["a"]}"#);
        assert!(p.violations().is_empty());
    }

    #[test]
    fn test_tags_are_optional() {
        let p = payload(r#"{"title":"T","body":"b"}"#);
        assert!(p.violations().is_empty());
    }

    #[test]
    fn test_missing_and_empty_fields_are_listed() {
        assert_eq!(payload(r#"{}"#).violations(), vec!["body", "title"]);
        assert_eq!(
            payload(r#"{"title":"","body":"b"}"#).violations(),
            vec!["title"]
        );
    }

    #[test]
    fn test_wrong_json_types_are_field_violations() {
        let fields = PostPayload::from_json(json!({
            "title": 123,
            "body": "b",
            "tags": "notarray"
        }))
        .unwrap_err();
        assert_eq!(fields, vec!["tags", "title"]);

        let fields = PostPayload::from_json(json!({
            "title": "T",
            "body": ["<p>b</p>"],
            "tags": [1, 2]
        }))
        .unwrap_err();
        assert_eq!(fields, vec!["body", "tags"]);
    }

    #[test]
    fn test_from_json_accepts_well_typed_document() {
        let p = PostPayload::from_json(json!({ "title": "T", "body": "b", "tags": null }))
            .unwrap();
        assert_eq!(p.title.as_deref(), Some("T"));
        assert!(p.tags.is_none());
    }

    #[test]
    fn test_non_object_document_lacks_required_fields() {
        assert_eq!(
            PostPayload::from_json(json!("just a string")).unwrap_err(),
            vec!["body", "title"]
        );
    }

    #[test]
    fn test_partial_update_without_body_is_rejected() {
        let p = payload(r#"{"title":"Only the title"}"#);
        assert_eq!(p.violations(), vec!["body"]);
    }
}
