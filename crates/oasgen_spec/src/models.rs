//! Data models for resource descriptions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SpecError, SpecResult};

/// Contact details copied into the generated `info.contact` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub url: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, email: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            url: url.into(),
        }
    }
}

/// A named entity for which collection and item operations are generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Singular identifier, used for schemas and single-item operations.
    pub name: String,
    /// Plural identifier, used for collection paths and list operations.
    pub plural: String,
    /// Suppresses create, update and delete when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
}

impl Resource {
    pub fn new(name: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plural: plural.into(),
            readonly: None,
        }
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = Some(true);
        self
    }

    /// Absent and `false` are treated the same.
    pub fn is_readonly(&self) -> bool {
        self.readonly.unwrap_or(false)
    }
}

/// The user-authored input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescription {
    pub title: String,
    pub description: String,
    pub contact: Contact,
    pub resources: Vec<Resource>,
}

impl ResourceDescription {
    pub fn new(title: impl Into<String>, description: impl Into<String>, contact: Contact) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            contact,
            resources: Vec::new(),
        }
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Parse raw input text into a typed description.
    ///
    /// Fails when the text is not JSON or when a field the compiler depends on
    /// is absent or has the wrong type. Content rules (non-empty strings, at
    /// least one resource) are the linter's concern and are not checked here.
    pub fn from_json(text: &str) -> SpecResult<Self> {
        serde_json::from_str(text).map_err(SpecError::from_json_error)
    }

    /// Read and parse a description from disk.
    pub fn from_path(path: impl AsRef<Path>) -> SpecResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SpecError::NotFound(path.to_path_buf()));
        }

        debug!("Reading resource description from {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_description() {
        let doc = ResourceDescription::from_json(
            r#"{
                "title": "Orders",
                "description": "Order API",
                "contact": {"name": "A", "email": "a@b.nl", "url": "https://b.nl"},
                "resources": [{"name": "order", "plural": "orders", "readonly": true}]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.title, "Orders");
        assert_eq!(doc.resources.len(), 1);
        assert!(doc.resources[0].is_readonly());
    }

    #[test]
    fn test_missing_contact_is_typed_error() {
        let err = ResourceDescription::from_json(
            r#"{"title": "T", "description": "D", "resources": []}"#,
        )
        .unwrap_err();

        assert!(matches!(err, SpecError::MissingField(ref f) if f == "contact"));
    }

    #[test]
    fn test_malformed_text_reports_position() {
        let err = ResourceDescription::from_json("{\n  \"title\": ").unwrap_err();
        match err {
            SpecError::InvalidFormat { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_readonly_defaults_to_false() {
        let resource = Resource::new("user", "users");
        assert!(!resource.is_readonly());
        assert!(resource.readonly().is_readonly());
    }
}
