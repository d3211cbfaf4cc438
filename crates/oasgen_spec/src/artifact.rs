//! The compiled API description document.
//!
//! Field declaration order is serialization order. Maps use [`IndexMap`] so
//! paths and schemas come out in resource order, which keeps the output
//! byte-stable for diffing and snapshot tests.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SpecResult;
use crate::models::Contact;

/// Root of the generated OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledArtifact {
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<Server>,
    pub tags: Vec<Tag>,
    pub paths: IndexMap<String, PathItem>,
    pub components: Components,
}

impl CompiledArtifact {
    /// Canonical JSON text: two-space indent, declaration key order.
    pub fn to_json(&self) -> SpecResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> SpecResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Generic tree view, used by template rendering.
    pub fn to_value(&self) -> SpecResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub version: String,
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub description: String,
}

/// Operations on one path.
///
/// Collection paths use `get`/`post`; item paths use `parameters`,
/// `get`, `put` and `delete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Reference>,
    pub get: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
}

impl PathItem {
    /// HTTP methods present on this path, in serialization order.
    pub fn methods(&self) -> Vec<&'static str> {
        let mut methods = vec!["get"];
        if self.put.is_some() {
            methods.push("put");
        }
        if self.post.is_some() {
            methods.push("post");
        }
        if self.delete.is_some() {
            methods.push("delete");
        }
        methods
    }

    /// All operations present on this path, in serialization order.
    pub fn operations(&self) -> Vec<&Operation> {
        std::iter::once(&self.get)
            .chain(self.put.as_ref())
            .chain(self.post.as_ref())
            .chain(self.delete.as_ref())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: String,
    pub description: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub responses: IndexMap<String, Response>,
}

/// A `$ref` pointer, local (`#/components/...`) or external.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub reference: String,
}

impl Reference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Ref(Reference),
    Inline(InlineResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineResponse {
    pub headers: IndexMap<String, Reference>,
    pub description: String,
    pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub schemas: IndexMap<String, Schema>,
    pub parameters: IndexMap<String, Parameter>,
}

/// Stub object schema; only the `id` property is generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub properties: IndexMap<String, PropertySchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub description: String,
    pub required: bool,
    pub schema: PropertySchema,
}
