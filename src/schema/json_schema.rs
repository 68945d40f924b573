//! JSON Schema adapter.
//!
//! [`JsonSchema`] wraps a compiled [`jsonschema::Validator`]. Each validation
//! error becomes an [`Issue`]; the error's JSON-pointer instance location is
//! split into path segments, with all-digit tokens read as array indices.

use serde_json::Value;
use thiserror::Error;

use super::traits::{SchemaOutcome, StandardSchema};
use crate::error::Issue;
use crate::openapi::ToJsonSchema;
use crate::path::{IssuePath, PathSegment};

/// Error returned when a JSON Schema document cannot be compiled.
#[derive(Debug, Error)]
pub enum JsonSchemaError {
    /// The document is not a valid JSON Schema.
    #[error("invalid JSON schema: {0}")]
    InvalidSchema(String),
}

/// A schema backed by a JSON Schema document.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use stins::{validate_sync, Schema};
///
/// let schema = Schema::json(json!({
///     "type": "object",
///     "required": ["name"],
///     "properties": { "name": { "type": "string" } }
/// }))
/// .unwrap();
///
/// assert!(validate_sync(&schema, &json!({"name": "Ada"})).unwrap().is_success());
/// assert!(validate_sync(&schema, &json!({})).unwrap().is_failure());
/// ```
pub struct JsonSchema {
    document: Value,
    compiled: jsonschema::Validator,
}

impl JsonSchema {
    /// Compiles `document`.
    ///
    /// # Errors
    ///
    /// Returns `JsonSchemaError::InvalidSchema` if the document does not compile.
    pub fn new(document: Value) -> Result<Self, JsonSchemaError> {
        let compiled = jsonschema::validator_for(&document)
            .map_err(|err| JsonSchemaError::InvalidSchema(err.to_string()))?;
        Ok(Self { document, compiled })
    }

    /// Returns the source document.
    pub fn document(&self) -> &Value {
        &self.document
    }
}

impl std::fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSchema")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl StandardSchema for JsonSchema {
    type Output = Value;

    fn vendor(&self) -> &str {
        "jsonschema"
    }

    fn validate<'a>(&'a self, value: &'a Value) -> SchemaOutcome<'a, Value> {
        let issues: Vec<Issue> = self
            .compiled
            .iter_errors(value)
            .map(|err| {
                let path = pointer_to_path(&err.instance_path.to_string());
                Issue {
                    message: err.to_string(),
                    path: (!path.is_root()).then_some(path),
                }
            })
            .collect();

        if issues.is_empty() {
            SchemaOutcome::value(value.clone())
        } else {
            SchemaOutcome::issues(issues)
        }
    }
}

impl ToJsonSchema for JsonSchema {
    fn to_json_schema(&self) -> Value {
        self.document.clone()
    }
}

/// Splits an RFC 6901 pointer such as `/items/0/name` into path segments.
fn pointer_to_path(pointer: &str) -> IssuePath {
    pointer
        .split('/')
        .skip(1)
        .map(|token| {
            let token = token.replace("~1", "/").replace("~0", "~");
            let canonical = token.bytes().all(|b| b.is_ascii_digit())
                && (token == "0" || !token.starts_with('0'));
            match token.parse::<usize>() {
                Ok(idx) if canonical => PathSegment::Index(idx),
                _ => PathSegment::Field(token),
            }
        })
        .collect()
}
