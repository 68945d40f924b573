//! OpenAPI description helpers.
//!
//! These build the `requestBody`/`response` objects of an OpenAPI document
//! from JSON Schemas:
//!
//! ```rust
//! use serde_json::json;
//! use stins::openapi::json_content;
//!
//! let content = json_content(json!({"type": "string"}), "A string response");
//!
//! assert_eq!(
//!     serde_json::to_value(&content).unwrap(),
//!     json!({
//!         "content": {"application/json": {"schema": {"type": "string"}}},
//!         "description": "A string response"
//!     })
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Media type key used by every helper.
pub const APPLICATION_JSON: &str = "application/json";

/// Types that can be described as a JSON Schema document.
pub trait ToJsonSchema {
    /// Returns the JSON Schema describing `self`.
    fn to_json_schema(&self) -> Value;
}

impl ToJsonSchema for Value {
    fn to_json_schema(&self) -> Value {
        self.clone()
    }
}

impl<T: ToJsonSchema + ?Sized> ToJsonSchema for &T {
    fn to_json_schema(&self) -> Value {
        (**self).to_json_schema()
    }
}

/// JSON Schema dialect a document is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaTarget {
    /// The OpenAPI 3.0 schema object.
    #[serde(rename = "openapi-3.0")]
    OpenApi30,
    /// JSON Schema draft 07.
    #[serde(rename = "draft-07")]
    Draft07,
    /// JSON Schema draft 2020-12.
    #[serde(rename = "draft-2020-12")]
    Draft202012,
}

impl SchemaTarget {
    /// The dialect's identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaTarget::OpenApi30 => "openapi-3.0",
            SchemaTarget::Draft07 => "draft-07",
            SchemaTarget::Draft202012 => "draft-2020-12",
        }
    }
}

impl fmt::Display for SchemaTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options accepted by the `*_with` helpers.
///
/// `target` is accepted for forward compatibility; schemas are currently
/// emitted unchanged whatever the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonContentOptions {
    /// Requested schema dialect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<SchemaTarget>,
}

impl JsonContentOptions {
    /// Options with every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target dialect and returns self for chaining.
    pub fn target(mut self, target: SchemaTarget) -> Self {
        self.target = Some(target);
        self
    }
}

/// `{"oneOf": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneOf {
    /// Alternative schemas, in order.
    #[serde(rename = "oneOf")]
    pub one_of: Vec<Value>,
}

impl ToJsonSchema for OneOf {
    fn to_json_schema(&self) -> Value {
        serde_json::json!({ "oneOf": self.one_of })
    }
}

/// `{"schema": ...}`, the media type object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// The schema describing the payload.
    pub schema: Value,
}

/// The content map of a request body or response, keyed by media type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// The `application/json` entry.
    #[serde(rename = "application/json")]
    pub application_json: MediaType,
}

/// `{"content": {"application/json": {"schema": ...}}, "description": ...}`,
/// with `"required": true` for request bodies built by
/// [`json_content_required`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonContent {
    /// Content by media type.
    pub content: Content,
    /// Human-readable description.
    pub description: String,
    /// Set for required request bodies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl JsonContent {
    /// The wrapped schema.
    pub fn schema(&self) -> &Value {
        &self.content.application_json.schema
    }
}

/// Wraps a schema as JSON content with a description.
pub fn json_content(schema: impl ToJsonSchema, description: impl Into<String>) -> JsonContent {
    json_content_with(schema, description, JsonContentOptions::default())
}

/// As [`json_content`], with options.
pub fn json_content_with(
    schema: impl ToJsonSchema,
    description: impl Into<String>,
    _options: JsonContentOptions,
) -> JsonContent {
    JsonContent {
        content: Content {
            application_json: MediaType {
                schema: schema.to_json_schema(),
            },
        },
        description: description.into(),
        required: None,
    }
}

/// As [`json_content`], marked `"required": true`.
pub fn json_content_required(schema: impl ToJsonSchema, description: impl Into<String>) -> JsonContent {
    json_content_required_with(schema, description, JsonContentOptions::default())
}

/// As [`json_content_required`], with options.
pub fn json_content_required_with(
    schema: impl ToJsonSchema,
    description: impl Into<String>,
    options: JsonContentOptions,
) -> JsonContent {
    JsonContent {
        required: Some(true),
        ..json_content_with(schema, description, options)
    }
}

/// Combines schemas into a `oneOf`, preserving order.
pub fn one_of<S: ToJsonSchema>(schemas: impl IntoIterator<Item = S>) -> OneOf {
    one_of_with(schemas, JsonContentOptions::default())
}

/// As [`one_of`], with options.
pub fn one_of_with<S: ToJsonSchema>(
    schemas: impl IntoIterator<Item = S>,
    _options: JsonContentOptions,
) -> OneOf {
    OneOf {
        one_of: schemas.into_iter().map(|schema| schema.to_json_schema()).collect(),
    }
}

/// JSON content whose schema is a `oneOf` of `schemas`.
pub fn json_content_one_of<S: ToJsonSchema>(
    schemas: impl IntoIterator<Item = S>,
    description: impl Into<String>,
) -> JsonContent {
    json_content_one_of_with(schemas, description, JsonContentOptions::default())
}

/// As [`json_content_one_of`], with options.
pub fn json_content_one_of_with<S: ToJsonSchema>(
    schemas: impl IntoIterator<Item = S>,
    description: impl Into<String>,
    options: JsonContentOptions,
) -> JsonContent {
    json_content_with(one_of_with(schemas, options), description, options)
}
